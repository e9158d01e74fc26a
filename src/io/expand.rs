//! Shell-style `$NAME` / `${NAME}` expansion for values and arguments

use crate::params::ParameterMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("Invalid regex")
});

/// Expand variables in `input` using `lookup`.
///
/// Unknown names expand to the empty string and `$$` to `$`. Inserted
/// text is not expanded again.
pub fn expand<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VARIABLE
        .replace_all(input, |caps: &Captures| {
            if caps.get(1).is_some() {
                return "$".to_string();
            }
            caps.get(2)
                .or_else(|| caps.get(3))
                .and_then(|name| lookup(name.as_str()))
                .unwrap_or_default()
        })
        .into_owned()
}

/// Look a name up in the parameters first, then the process environment.
pub fn lookup_in(parameters: &ParameterMap, name: &str) -> Option<String> {
    parameters
        .get(name)
        .map(str::to_string)
        .or_else(|| std::env::var(name).ok())
}

/// Expand every parameter value against the map as it was before
/// expansion started.
pub fn expand_parameters(parameters: &mut ParameterMap) {
    let snapshot = parameters.clone();
    parameters.map_values(|value| expand(value, |name| lookup_in(&snapshot, name)));
}

/// Expand command-line arguments against the parameters and environment.
pub fn expand_args(args: &[String], parameters: &ParameterMap) -> Vec<String> {
    args.iter()
        .map(|arg| expand(arg, |name| lookup_in(parameters, name)))
        .collect()
}
