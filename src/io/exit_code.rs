//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - parameters resolved and exported
//! - `1`: General error - unspecified failure
//! - `3-125`: Specific errors
//! - `126-255`: Reserved by shell

use crate::error::ResolveError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Requested parameters could not be found (code 3)
    NotFound = 3,

    /// File I/O or process error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Parameter content could not be decoded (code 7)
    MalformedData = 7,

    /// A transformation failed (code 8)
    TransformationFailed = 8,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `ResolveError` to the appropriate exit code.
    pub fn from_error(error: &ResolveError) -> Self {
        match error {
            ResolveError::FetchNotFound { .. } | ResolveError::InsufficientParameters { .. } => {
                ExitCode::NotFound
            }
            ResolveError::MalformedJson { .. } => ExitCode::MalformedData,
            ResolveError::UnresolvedReference { .. } => ExitCode::TransformationFailed,
            ResolveError::InvalidTransformation { .. }
            | ResolveError::UnknownTransformationAction { .. }
            | ResolveError::Config(_) => ExitCode::ConfigError,
            ResolveError::FileWrite { .. } | ResolveError::Exec { .. } => ExitCode::IoError,
            ResolveError::FetchTransport { .. } => ExitCode::GeneralError,
        }
    }

    /// Get a human-readable description of the exit code.
    pub fn description(&self) -> &str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::GeneralError => "General error",
            ExitCode::NotFound => "Not found",
            ExitCode::IoError => "I/O error",
            ExitCode::ConfigError => "Configuration error",
            ExitCode::MalformedData => "Malformed parameter data",
            ExitCode::TransformationFailed => "Transformation failed",
        }
    }
}
