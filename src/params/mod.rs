//! Parameter model: the ordered key/value map threaded through the
//! pipeline and the descriptors that say where its entries come from.

pub mod merge;
pub mod store;

pub use merge::{MergeReport, merge, validate_strict};
pub use store::{FetchError, FileStore, ParameterStore, RawParameter};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from parameter key to value.
///
/// Insertion order is kept for output; overwriting a key keeps its
/// position. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: IndexMap<String, String>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, shifting later entries up so order is preserved.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrite every value in place, keeping keys and order.
    pub fn map_values(&mut self, mut f: impl FnMut(&str) -> String) {
        for value in self.entries.values_mut() {
            *value = f(value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whether a descriptor addresses a single parameter or a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Path,
    Name,
}

/// How a fetched value becomes map entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// The value is a JSON object; each member becomes an entry.
    Json,
    /// The value is used as-is under the parameter's base name.
    Plain,
}

/// One request to the parameter store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub format: ValueFormat,
    /// Only meaningful for [`SourceKind::Path`].
    pub recursive: bool,
    pub identifier: String,
}

impl SourceDescriptor {
    pub fn path(identifier: impl Into<String>, format: ValueFormat, recursive: bool) -> Self {
        Self {
            kind: SourceKind::Path,
            format,
            recursive,
            identifier: identifier.into(),
        }
    }

    pub fn name(identifier: impl Into<String>, format: ValueFormat) -> Self {
        Self {
            kind: SourceKind::Name,
            format,
            recursive: false,
            identifier: identifier.into(),
        }
    }
}

/// The four source groups, evaluated in fixed precedence order:
/// JSON paths, JSON names, plain paths, plain names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceGroups {
    pub json_paths: Vec<SourceDescriptor>,
    pub json_names: Vec<SourceDescriptor>,
    pub plain_paths: Vec<SourceDescriptor>,
    pub plain_names: Vec<SourceDescriptor>,
}

impl SourceGroups {
    /// Build the groups from raw identifiers.
    pub fn from_identifiers(
        paths: &[String],
        names: &[String],
        plain_paths: &[String],
        plain_names: &[String],
        recursive: bool,
    ) -> Self {
        Self {
            json_paths: paths
                .iter()
                .map(|p| SourceDescriptor::path(p, ValueFormat::Json, recursive))
                .collect(),
            json_names: names
                .iter()
                .map(|n| SourceDescriptor::name(n, ValueFormat::Json))
                .collect(),
            plain_paths: plain_paths
                .iter()
                .map(|p| SourceDescriptor::path(p, ValueFormat::Plain, recursive))
                .collect(),
            plain_names: plain_names
                .iter()
                .map(|n| SourceDescriptor::name(n, ValueFormat::Plain))
                .collect(),
        }
    }

    /// All descriptors in precedence order, lowest first.
    pub fn ordered(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.json_paths
            .iter()
            .chain(&self.json_names)
            .chain(&self.plain_paths)
            .chain(&self.plain_names)
    }

    /// Number of requested names and paths.
    pub fn requested(&self) -> usize {
        self.json_paths.len()
            + self.json_names.len()
            + self.plain_paths.len()
            + self.plain_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested() == 0
    }
}

/// Last `/`-separated segment of a parameter name.
pub fn base_name(name: &str) -> &str {
    let trimmed = name.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
