//! Running the wrapped command with the resolved parameters in its
//! environment.

use crate::error::{ResolveError, ResolveResult};
use crate::params::ParameterMap;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Build the child command: inherited environment plus the parameters,
/// parameters winning on conflict.
pub fn build_command(program: &str, args: &[String], parameters: &ParameterMap) -> Command {
    let mut command = Command::new(program);
    command.args(args).envs(parameters.iter());
    command
}

/// Run `program` and wait for it, returning its exit code.
///
/// A child killed by a signal reports `128 + signal` like a shell does.
pub fn spawn_and_wait(
    program: &str,
    args: &[String],
    parameters: &ParameterMap,
) -> ResolveResult<i32> {
    let status = build_command(program, args, parameters)
        .status()
        .map_err(|source| ResolveError::Exec {
            command: program.to_string(),
            source,
        })?;
    Ok(exit_code_of(status))
}

/// Replace the current process with `program`.
///
/// Only returns on failure to execute. Where process replacement is not
/// available the child is run to completion and its exit code returned.
pub fn replace_process(
    program: &str,
    args: &[String],
    parameters: &ParameterMap,
) -> ResolveResult<i32> {
    debug!(
        %program,
        args = args.len(),
        env = parameters.len(),
        "executing command"
    );

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        let source = build_command(program, args, parameters).exec();
        Err(ResolveError::Exec {
            command: program.to_string(),
            source,
        })
    }

    #[cfg(not(unix))]
    {
        spawn_and_wait(program, args, parameters)
    }
}

fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
