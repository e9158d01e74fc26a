//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Exit codes mapped from resolution errors
//! - The exporters: `.env` writer, stdout printer and command runner
//! - Shell-style expansion of values and arguments

pub mod dotenv;
pub mod exec;
pub mod exit_code;
pub mod expand;
pub mod output;

pub use exit_code::ExitCode;
pub use output::OutputFormat;
