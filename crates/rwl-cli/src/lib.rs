//! CLI library components for the decadal file reader.

pub mod export;
pub mod logging;
