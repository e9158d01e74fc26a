//! Resolution entry point: merge, strict check, transformations.

use crate::error::ResolveResult;
use crate::params::{ParameterMap, ParameterStore, SourceGroups, merge, validate_strict};
use crate::transform::{Transformation, apply_all};
use tracing::info;

/// Resolve the final parameter map.
///
/// Nothing is returned unless every stage succeeds; callers never see a
/// partially transformed map.
pub fn resolve<S>(
    store: &S,
    groups: &SourceGroups,
    transformations: &[Transformation],
    strict: bool,
) -> ResolveResult<ParameterMap>
where
    S: ParameterStore + ?Sized,
{
    let report = merge(store, groups)?;
    info!(
        requested = report.requested,
        resolved = report.resolved,
        parameters = report.parameters.len(),
        "merged parameters"
    );

    if strict {
        validate_strict(report.requested, report.resolved, &report.missing)?;
    }

    let mut parameters = report.parameters;
    apply_all(&mut parameters, transformations)?;
    if !transformations.is_empty() {
        info!(
            transformations = transformations.len(),
            parameters = parameters.len(),
            "applied transformations"
        );
    }

    Ok(parameters)
}
