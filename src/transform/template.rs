//! Template substitution against the parameter map
//!
//! References look like `{{.KEY}}` (spaces inside the braces are
//! allowed). Substitution is single-pass: inserted values are never
//! scanned again.

use crate::error::{ResolveError, ResolveResult};
use crate::params::ParameterMap;
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*\.([^\s{}]+)\s*\}\}").expect("Invalid regex"));

/// Render `template` for the entry `key`.
///
/// Returns `UnresolvedReference` for the first reference whose key is
/// not in `parameters`.
pub fn render(key: &str, template: &str, parameters: &ParameterMap) -> ResolveResult<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for capture in REFERENCE.captures_iter(template) {
        let (Some(whole), Some(name)) = (capture.get(0), capture.get(1)) else {
            continue;
        };

        let value = parameters
            .get(name.as_str())
            .ok_or_else(|| ResolveError::UnresolvedReference {
                key: key.to_string(),
                reference: name.as_str().to_string(),
            })?;

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(value);
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}
