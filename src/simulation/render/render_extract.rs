use super::ThermalCore;

pub(super) fn surface_ptr(core: &ThermalCore) -> *const u8 {
    core.compositor.surface().pixels_ptr()
}

pub(super) fn surface_len_bytes(core: &ThermalCore) -> usize {
    core.compositor.surface().byte_len()
}

pub(super) fn frame_rgba(core: &ThermalCore) -> Vec<u8> {
    core.compositor.surface().as_rgba().to_vec()
}

pub(super) fn heat_ptr(core: &ThermalCore) -> *const f32 {
    core.field.values_ptr()
}
