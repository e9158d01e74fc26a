//! `.env` file writer
//!
//! One `KEY="value"` line per parameter, in map order. Inside the quotes
//! `\`, newline, carriage return, `"`, `!`, `$` and backtick are
//! backslash-escaped.

use crate::error::{ResolveError, ResolveResult};
use crate::params::ParameterMap;
use std::path::Path;

/// Quote a value for a double-quoted dotenv entry
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '"' | '!' | '$' | '`' => {
                quoted.push('\\');
                quoted.push(c);
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render the map as dotenv text
pub fn render(parameters: &ParameterMap) -> String {
    let mut out = String::new();
    for (key, value) in parameters.iter() {
        out.push_str(key);
        out.push('=');
        out.push_str(&quote(value));
        out.push('\n');
    }
    out
}

/// Write the map to `path`, replacing any existing file
pub fn write(path: &Path, parameters: &ParameterMap) -> ResolveResult<()> {
    std::fs::write(path, render(parameters)).map_err(|source| ResolveError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
