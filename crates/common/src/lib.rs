//! Common types and utilities shared across all crates

pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod types;

pub use config::*;
pub use error::{Result, SafetyError};
pub use logging::*;
pub use types::*;
