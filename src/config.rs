//! Configuration module for ssm-parent.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - A config file (TOML, or JSON when the extension is `.json`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `SSM_PARENT_`:
//! - `SSM_PARENT_STRICT=true` sets `strict`
//! - `SSM_PARENT_PLAIN_NAME=[/app/KEY,/app/OTHER]` sets `plain-name`
//! - `SSM_PARENT_STORE=/etc/params.toml` sets `store`

use crate::error::ResolveResult;
use crate::params::SourceGroups;
use crate::transform::{TransformationList, parse_transformations};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SSM_PARENT_";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Turn on debug logging
    #[serde(default)]
    pub debug: bool,

    /// Expand `$VAR` references in values and arguments
    #[serde(default)]
    pub expand: bool,

    /// Fail when fewer parameters resolve than were requested
    #[serde(default)]
    pub strict: bool,

    /// Walk paths recursively
    #[serde(default)]
    pub recursive: bool,

    /// Paths whose parameters hold JSON objects
    #[serde(default)]
    pub path: Vec<String>,

    /// Names of parameters holding JSON objects
    #[serde(default)]
    pub name: Vec<String>,

    /// Paths whose parameters hold plain values
    #[serde(default, rename = "plain-path")]
    pub plain_path: Vec<String>,

    /// Names of parameters holding plain values
    #[serde(default, rename = "plain-name")]
    pub plain_name: Vec<String>,

    /// File backing the parameter store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    /// Transformation records, decoded by [`Settings::transformation_list`]
    #[serde(default)]
    pub transformations: Vec<serde_json::Value>,
}

impl Settings {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        let figment = match config_path {
            Some(path) if !path.exists() => {
                return Err(Box::new(figment::Error::from(format!(
                    "config file '{}' does not exist",
                    path.display()
                ))));
            }
            Some(path) => with_file(defaults(), path),
            None => defaults(),
        };

        figment
            // Env keys arrive as `plain_name`; file keys are `plain-name`
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace('_', "-").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Load configuration from a specific file, ignoring the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        with_file(defaults(), path.as_ref())
            .extract()
            .map_err(Box::new)
    }

    /// Source descriptors for the configured identifiers
    pub fn source_groups(&self) -> SourceGroups {
        SourceGroups::from_identifiers(
            &self.path,
            &self.name,
            &self.plain_path,
            &self.plain_name,
            self.recursive,
        )
    }

    /// Decode the transformation records
    pub fn transformation_list(&self) -> ResolveResult<TransformationList> {
        parse_transformations(&self.transformations)
    }
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(Settings::default()))
}

fn with_file(figment: Figment, path: &Path) -> Figment {
    if is_json(path) {
        figment.merge(Json::file(path))
    } else {
        figment.merge(Toml::file(path))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
