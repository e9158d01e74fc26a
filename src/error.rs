//! Error types for parameter resolution
//!
//! This module provides structured error types using thiserror. Every
//! variant except [`ResolveError::FetchNotFound`] and
//! [`ResolveError::UnknownTransformationAction`] aborts a run; those two
//! are absorbed where they occur and only logged.

use crate::io::exit_code::ExitCode;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the resolution pipeline and its exporters
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Store errors
    #[error("Parameter '{identifier}' not found in the parameter store")]
    FetchNotFound { identifier: String },

    #[error("Failed to fetch '{identifier}' from the parameter store: {reason}")]
    FetchTransport { identifier: String, reason: String },

    /// Content errors
    #[error("Parameter '{identifier}' does not hold a valid JSON object: {reason}")]
    MalformedJson { identifier: String, reason: String },

    #[error(
        "Strict mode: resolved {resolved} of {requested} requested parameters (missing: {})",
        .missing.join(", ")
    )]
    InsufficientParameters {
        requested: usize,
        resolved: usize,
        missing: Vec<String>,
    },

    /// Transformation errors
    #[error("Template for '{key}' references '{reference}', which is not a known parameter")]
    UnresolvedReference { key: String, reference: String },

    #[error("Transformation #{index} has unknown action '{action}'")]
    UnknownTransformationAction { index: usize, action: String },

    #[error("Transformation #{index} ({action}) is invalid: {reason}")]
    InvalidTransformation {
        index: usize,
        action: String,
        reason: String,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Exporter errors
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to execute '{command}': {source}")]
    Exec {
        command: String,
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::FetchNotFound { .. } => "FETCH_NOT_FOUND",
            Self::FetchTransport { .. } => "FETCH_TRANSPORT",
            Self::MalformedJson { .. } => "MALFORMED_JSON",
            Self::InsufficientParameters { .. } => "INSUFFICIENT_PARAMETERS",
            Self::UnresolvedReference { .. } => "UNRESOLVED_REFERENCE",
            Self::UnknownTransformationAction { .. } => "UNKNOWN_TRANSFORMATION_ACTION",
            Self::InvalidTransformation { .. } => "INVALID_TRANSFORMATION",
            Self::Config(_) => "CONFIG_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::Exec { .. } => "EXEC_ERROR",
        }
    }

    /// Map this error to the process exit code.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from_error(self)
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FetchTransport { .. } => vec![
                "Check that the parameter store is reachable",
                "Check that the credentials in use may read the requested parameters",
            ],
            Self::MalformedJson { .. } => vec![
                "Use --plain-name/--plain-path for parameters that hold a single raw value",
                "JSON parameters must hold a flat object of strings, numbers or booleans",
            ],
            Self::InsufficientParameters { .. } => vec![
                "Check the spelling of every --name and --path",
                "Drop --strict to continue with the parameters that were found",
            ],
            Self::UnresolvedReference { .. } => vec![
                "Templates may only reference parameters that exist when the template runs",
                "Move the template after the rename that creates the referenced key",
            ],
            Self::InvalidTransformation { .. } | Self::Config(_) => {
                vec!["Check the transformations section of the config file"]
            }
            _ => vec![],
        }
    }
}

/// Result type alias for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
