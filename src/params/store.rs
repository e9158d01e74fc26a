//! Parameter store capability and a file-backed implementation
//!
//! The resolver only needs "fetch by path or name, optionally decrypting
//! secure values". [`ParameterStore`] is that seam; [`FileStore`] serves
//! it from a TOML or JSON document so the binary works without a remote
//! service.

use super::{SourceDescriptor, SourceKind};
use crate::error::{ResolveError, ResolveResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Value shown for secure parameters fetched without decryption.
pub const MASKED_VALUE: &str = "****";

/// A parameter as returned by the store, named by its full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub value: String,
}

impl RawParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Errors a store reports for a single descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Transport(String),
}

/// Read access to a key-value parameter store.
///
/// Implementations must be shareable across threads: the resolver may
/// fetch several descriptors concurrently.
pub trait ParameterStore: Send + Sync {
    /// Fetch the parameters a descriptor addresses.
    ///
    /// Name lookups yield exactly one parameter or `NotFound`. Path
    /// lookups yield the leaves under the path sorted by full name (all
    /// descendants when `descriptor.recursive` is set, direct children
    /// otherwise) or `NotFound` when there are none.
    fn fetch(
        &self,
        descriptor: &SourceDescriptor,
        with_decryption: bool,
    ) -> Result<Vec<RawParameter>, FetchError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Plain(String),
    Detailed {
        value: String,
        #[serde(default)]
        secure: bool,
    },
}

#[derive(Debug, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    parameters: BTreeMap<String, StoredEntry>,
}

#[derive(Debug, Clone)]
struct StoredParameter {
    value: String,
    secure: bool,
}

/// Parameter store backed by a local document.
///
/// ```toml
/// [parameters]
/// "/app/prod/API_KEY" = { value = "s3cr3t", secure = true }
/// "/app/prod/REGION" = "eu-west-1"
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    parameters: BTreeMap<String, StoredParameter>,
}

impl FileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<String>, secure: bool) {
        self.parameters.insert(
            name.into(),
            StoredParameter {
                value: value.into(),
                secure,
            },
        );
    }

    /// Builder-style [`FileStore::put`] for a non-secure value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.put(name, value, false);
        self
    }

    /// Load a store document; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> ResolveResult<Self> {
        let unavailable = |reason: String| ResolveError::FetchTransport {
            identifier: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| unavailable(format!("cannot read store file: {e}")))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let document: StoreDocument = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| unavailable(format!("cannot parse store file: {e}")))?
        } else {
            toml::from_str(&content)
                .map_err(|e| unavailable(format!("cannot parse store file: {e}")))?
        };

        let mut store = Self::new();
        for (name, entry) in document.parameters {
            match entry {
                StoredEntry::Plain(value) => store.put(name, value, false),
                StoredEntry::Detailed { value, secure } => store.put(name, value, secure),
            }
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    fn raw(name: &str, stored: &StoredParameter, with_decryption: bool) -> RawParameter {
        let value = if stored.secure && !with_decryption {
            MASKED_VALUE.to_string()
        } else {
            stored.value.clone()
        };
        RawParameter::new(name, value)
    }

    fn by_name(&self, name: &str, with_decryption: bool) -> Result<Vec<RawParameter>, FetchError> {
        if let Some((key, stored)) = self.parameters.get_key_value(name) {
            return Ok(vec![Self::raw(key, stored, with_decryption)]);
        }
        if !name.starts_with('/') {
            let rooted = format!("/{name}");
            if let Some((key, stored)) = self.parameters.get_key_value(&rooted) {
                return Ok(vec![Self::raw(key, stored, with_decryption)]);
            }
        }
        Err(FetchError::NotFound)
    }

    fn by_path(
        &self,
        path: &str,
        recursive: bool,
        with_decryption: bool,
    ) -> Result<Vec<RawParameter>, FetchError> {
        let mut prefix = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if !prefix.ends_with('/') {
            prefix.push('/');
        }

        let leaves: Vec<RawParameter> = self
            .parameters
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .filter(|(name, _)| recursive || !name[prefix.len()..].contains('/'))
            .map(|(name, stored)| Self::raw(name, stored, with_decryption))
            .collect();

        if leaves.is_empty() {
            Err(FetchError::NotFound)
        } else {
            Ok(leaves)
        }
    }
}

impl ParameterStore for FileStore {
    fn fetch(
        &self,
        descriptor: &SourceDescriptor,
        with_decryption: bool,
    ) -> Result<Vec<RawParameter>, FetchError> {
        match descriptor.kind {
            SourceKind::Name => self.by_name(&descriptor.identifier, with_decryption),
            SourceKind::Path => self.by_path(
                &descriptor.identifier,
                descriptor.recursive,
                with_decryption,
            ),
        }
    }
}
