//! Bounds-check macros for the per-cell hot loops.
//!
//! Debug builds index normally and panic with a clear message; release builds
//! use unchecked access. Callers must only pass indices derived from the
//! field / surface dimensions they are iterating.
//!
//! ```rust
//! use thermal_engine::fast;
//!
//! let heat = vec![0.0f32, 0.25, 0.5, 0.75];
//! let v = *fast!(heat, [2]);
//! assert_eq!(v, 0.5);
//!
//! let mut out = vec![0u8; 4];
//! fast!(out, [3] = 255);
//! assert_eq!(out[3], 255);
//! ```

/// Indexed read / write with bounds checks only in debug builds.
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}
