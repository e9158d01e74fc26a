//! Decoding transformation records from configuration
//!
//! Records are untyped maps. The `action` field is read first; only a
//! known action is then decoded into its variant's fields. Unknown
//! actions are logged and skipped.

use super::{Transformation, TransformationList};
use crate::error::{ResolveError, ResolveResult};
use serde_json::Value;
use tracing::warn;

const KNOWN_ACTIONS: [&str; 3] = ["delete", "rename", "template"];

/// Turn configuration records into a transformation list.
///
/// A known action with missing or mistyped fields is an
/// `InvalidTransformation` error; a record without a recognised action
/// is skipped with a warning.
pub fn parse_transformations(records: &[Value]) -> ResolveResult<TransformationList> {
    let mut transformations = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(fields) = record.as_object() else {
            return Err(ResolveError::InvalidTransformation {
                index,
                action: String::new(),
                reason: "expected a table of fields".to_string(),
            });
        };

        let action = fields
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if !KNOWN_ACTIONS.contains(&action) {
            let skipped = ResolveError::UnknownTransformationAction {
                index,
                action: action.to_string(),
            };
            warn!("{skipped}, skipping");
            continue;
        }

        let transformation: Transformation =
            serde_json::from_value(record.clone()).map_err(|e| {
                ResolveError::InvalidTransformation {
                    index,
                    action: action.to_string(),
                    reason: e.to_string(),
                }
            })?;
        transformations.push(transformation);
    }

    Ok(transformations)
}
