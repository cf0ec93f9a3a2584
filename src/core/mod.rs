//! Core storage and low-level helpers.
//!
//! - utils/  - bounds-check macros, RNG, console logger
//! - field   - double-buffered heat field storage

#[macro_use]
pub mod utils;
pub mod field;
