#[macro_use]
pub mod safety;
pub mod logger;
pub mod random;
