//! CLI module
//!
//! Handles command-line argument parsing for the `farmacia` binary.

pub mod args;

pub use args::{Args, Commands, OutputFormat, Verbosity};
