//! Merge engine: fetches every source descriptor and folds the results
//! into one [`ParameterMap`] in fixed precedence order.
//!
//! Fetches run in parallel; merging happens afterwards in declaration
//! order, so completion order never affects the result.

use super::store::{FetchError, ParameterStore, RawParameter};
use super::{ParameterMap, SourceDescriptor, SourceGroups, ValueFormat, base_name};
use crate::error::{ResolveError, ResolveResult};
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Outcome of a merge: the map plus what strict mode needs to judge it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub parameters: ParameterMap,
    /// Number of descriptors requested.
    pub requested: usize,
    /// Number of descriptors that yielded at least one parameter.
    pub resolved: usize,
    /// Identifiers that yielded nothing.
    pub missing: Vec<String>,
}

/// Fetch all groups and merge them, later sources overwriting earlier.
pub fn merge<S>(store: &S, groups: &SourceGroups) -> ResolveResult<MergeReport>
where
    S: ParameterStore + ?Sized,
{
    let descriptors: Vec<&SourceDescriptor> = groups.ordered().collect();

    let fetched: Vec<Result<Vec<RawParameter>, FetchError>> = descriptors
        .par_iter()
        .map(|descriptor| store.fetch(descriptor, true))
        .collect();

    let mut report = MergeReport {
        requested: descriptors.len(),
        ..MergeReport::default()
    };

    for (descriptor, result) in descriptors.into_iter().zip(fetched) {
        let raw = match result {
            Ok(raw) if !raw.is_empty() => raw,
            Ok(_) | Err(FetchError::NotFound) => {
                debug!(identifier = %descriptor.identifier, "parameter not found");
                report.missing.push(descriptor.identifier.clone());
                continue;
            }
            Err(FetchError::Transport(reason)) => {
                return Err(ResolveError::FetchTransport {
                    identifier: descriptor.identifier.clone(),
                    reason,
                });
            }
        };

        debug!(
            identifier = %descriptor.identifier,
            count = raw.len(),
            "fetched parameters"
        );
        report.resolved += 1;

        for parameter in raw {
            match descriptor.format {
                ValueFormat::Plain => {
                    report
                        .parameters
                        .insert(base_name(&parameter.name), parameter.value);
                }
                ValueFormat::Json => {
                    for (key, value) in decode_json_object(&parameter)? {
                        report.parameters.insert(key, value);
                    }
                }
            }
        }
    }

    Ok(report)
}

/// Strict-mode check: every requested descriptor must have resolved.
pub fn validate_strict(requested: usize, resolved: usize, missing: &[String]) -> ResolveResult<()> {
    if resolved < requested {
        return Err(ResolveError::InsufficientParameters {
            requested,
            resolved,
            missing: missing.to_vec(),
        });
    }
    Ok(())
}

/// Decode a JSON-valued parameter into key/value pairs in document order.
///
/// Strings are taken verbatim, numbers and booleans as their JSON text,
/// `null` as the empty string. Anything nested is rejected.
fn decode_json_object(parameter: &RawParameter) -> ResolveResult<Vec<(String, String)>> {
    let malformed = |reason: String| ResolveError::MalformedJson {
        identifier: parameter.name.clone(),
        reason,
    };

    let value: Value =
        serde_json::from_str(&parameter.value).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(malformed("top-level value is not an object".to_string()));
    };

    object
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(malformed(format!("member '{key}' is not a scalar")));
                }
            };
            Ok((key, text))
        })
        .collect()
}
