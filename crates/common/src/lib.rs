//! Helpers shared by both registry binaries.

pub mod utils;
