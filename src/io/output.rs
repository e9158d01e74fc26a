//! Printing resolved parameters to stdout.

use crate::io::dotenv;
use crate::params::ParameterMap;
use clap::ValueEnum;
use std::io::{self, Write};

/// Output format for the `print` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object (default)
    #[default]
    Json,
    /// `KEY="value"` lines, as written by `dotenv`
    Dotenv,
}

/// Write the parameters to `writer` in `format`.
pub fn write_parameters<W: Write>(
    writer: &mut W,
    parameters: &ParameterMap,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(writer, "{}", serde_json::to_string_pretty(parameters)?)?;
        }
        OutputFormat::Dotenv => {
            write!(writer, "{}", dotenv::render(parameters))?;
        }
    }
    writer.flush()
}

/// Print to stdout, treating a closed pipe as success.
pub fn print_parameters(parameters: &ParameterMap, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match write_parameters(&mut handle, parameters, format) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
