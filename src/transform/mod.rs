//! Declarative transformations over the resolved parameter map
//!
//! A transformation list is applied as a strict left-to-right fold: each
//! step sees the map exactly as the previous step left it, and the first
//! failure stops the pipeline.

pub mod parse;
pub mod template;

pub use parse::parse_transformations;

use self::template::render;

use crate::error::ResolveResult;
use crate::params::ParameterMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One mutation of the parameter map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Transformation {
    /// Remove `key`; absent keys are ignored.
    Delete { key: String },
    /// Move the value of `from` to `to`, overwriting `to`. Absent `from`
    /// is ignored.
    Rename { from: String, to: String },
    /// Set `key` to `template` with `{{.KEY}}` references substituted.
    Template { key: String, template: String },
}

/// Transformations in execution order.
pub type TransformationList = Vec<Transformation>;

impl Transformation {
    /// The `action` name used in configuration
    pub fn action(&self) -> &'static str {
        match self {
            Self::Delete { .. } => "delete",
            Self::Rename { .. } => "rename",
            Self::Template { .. } => "template",
        }
    }

    /// Apply this transformation in place.
    pub fn apply(&self, parameters: &mut ParameterMap) -> ResolveResult<()> {
        match self {
            Self::Delete { key } => {
                if parameters.remove(key).is_none() {
                    debug!(%key, "delete: key not present");
                }
            }
            Self::Rename { from, to } => {
                if from == to {
                    return Ok(());
                }
                match parameters.remove(from) {
                    Some(value) => {
                        parameters.insert(to.as_str(), value);
                    }
                    None => debug!(%from, %to, "rename: source key not present"),
                }
            }
            Self::Template { key, template } => {
                let rendered = render(key, template, parameters)?;
                parameters.insert(key.as_str(), rendered);
            }
        }
        Ok(())
    }
}

/// Apply every transformation in order, stopping at the first error.
///
/// On error the map holds the output of the last successful step.
pub fn apply_all(
    parameters: &mut ParameterMap,
    transformations: &[Transformation],
) -> ResolveResult<()> {
    for (index, transformation) in transformations.iter().enumerate() {
        transformation.apply(parameters)?;
        debug!(
            index,
            action = transformation.action(),
            "applied transformation"
        );
    }
    Ok(())
}

/// Owning form of [`apply_all`].
pub fn apply(
    mut parameters: ParameterMap,
    transformations: &[Transformation],
) -> ResolveResult<ParameterMap> {
    apply_all(&mut parameters, transformations)?;
    Ok(parameters)
}
