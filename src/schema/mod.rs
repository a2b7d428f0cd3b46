//! Schema module - Configuration and genome types for maze evolution.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
