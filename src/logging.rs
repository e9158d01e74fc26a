//! Log level selection and subscriber setup
//!
//! The level comes from `LOG_LEVEL` (names or the numeric aliases
//! `5..-1`), falling back to `info`. `--debug` forces `debug`. Logs go to
//! stderr so that `print` output stays clean.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Map a `LOG_LEVEL` value to a level filter.
///
/// `panic` and `fatal` have no tracing equivalent and map to `error`.
/// Unknown or empty values yield `info`.
pub fn level_from_str(value: &str) -> LevelFilter {
    match value.trim().to_lowercase().as_str() {
        "panic" | "5" | "fatal" | "4" | "error" | "3" => LevelFilter::ERROR,
        "warn" | "warning" | "2" => LevelFilter::WARN,
        "info" | "1" => LevelFilter::INFO,
        "debug" | "0" => LevelFilter::DEBUG,
        "trace" | "-1" => LevelFilter::TRACE,
        _ => LevelFilter::INFO,
    }
}

/// Resolve the effective level from the environment and the debug flag.
pub fn effective_level(env_value: Option<&str>, debug: bool) -> LevelFilter {
    let level = env_value.map(level_from_str).unwrap_or(LevelFilter::INFO);
    if debug && level < LevelFilter::DEBUG {
        LevelFilter::DEBUG
    } else {
        level
    }
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(debug: bool) {
    let env_value = std::env::var(LOG_LEVEL_VAR).ok();
    let level = effective_level(env_value.as_deref(), debug);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy("");

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
