//! Command-line front end for the risk engine

pub mod args;
pub mod commands;
pub mod completions;
pub mod display;
pub mod input;
pub mod interactive;

pub use args::{Cli, Commands};
