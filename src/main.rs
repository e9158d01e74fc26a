//! CLI entry point for ssm-parent.
//!
//! Resolves parameters according to the layered settings, then runs a
//! command with them, writes a `.env` file, or prints them.

use anyhow::Context;
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use ssm_parent::io::{ExitCode, OutputFormat, dotenv, exec, expand, output};
use ssm_parent::{FileStore, ResolveError, ResolveResult, Settings, SourceGroups, logging, resolve};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Docker entrypoint that gets parameters from a parameter store
#[derive(Parser)]
#[command(
    name = "ssm-parent",
    version = env!("CARGO_PKG_VERSION"),
    about = "Docker entrypoint that gets parameters from a parameter store",
    long_about = "Gets the specified parameters (possibly secret) from a parameter store, \
then exports them to the underlying process or writes a .env file.\n\n\
Parameters are read in the order path -> name -> plain-path -> plain-name, \
so every later source overrides the earlier ones.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to the config file (optional). Allows setting transformations
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Turn on debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Expand arguments and values using shell-style syntax
    #[arg(short, long, global = true)]
    expand: bool,

    /// Path to parameters whose values are JSON objects. Repeatable
    #[arg(short, long, global = true)]
    path: Vec<String>,

    /// Name of a parameter whose value is a JSON object. Repeatable
    #[arg(short, long, global = true)]
    name: Vec<String>,

    /// Path to parameters holding plain values. Repeatable
    #[arg(long, global = true)]
    plain_path: Vec<String>,

    /// Name of a parameter holding a plain value. Repeatable
    #[arg(long, global = true)]
    plain_name: Vec<String>,

    /// Walk through the provided paths recursively
    #[arg(short, long, global = true)]
    recursive: bool,

    /// Fail if fewer parameters are found than were requested
    #[arg(short, long, global = true)]
    strict: bool,

    /// File backing the parameter store (TOML or JSON)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Run a command with the parameters exported as environment variables
    #[command(
        after_help = "Examples:\n  \
ssm-parent --store params.toml -n /app/config run -- ./server --port 8080\n  \
ssm-parent -e --plain-name /app/PORT run -- sh -c 'echo $PORT'"
    )]
    Run {
        /// Command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Write the parameters to a .env file
    Dotenv {
        /// Output file
        #[arg(default_value = ".env")]
        file: PathBuf,
    },

    /// Print the parameters to stdout
    Print {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    let cli_debug = cli.debug;

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            logging::init(cli_debug);
            let (exit_code, status) = match err.downcast_ref::<ResolveError>() {
                Some(resolve_err) => (resolve_err.exit_code(), resolve_err.status_code()),
                None => (ExitCode::GeneralError, "GENERAL_ERROR"),
            };
            error!(
                status,
                exit_code = i32::from(exit_code),
                "{}: {err:#}",
                exit_code.description()
            );
            if let Some(resolve_err) = err.downcast_ref::<ResolveError>() {
                for suggestion in resolve_err.recovery_suggestions() {
                    info!("suggestion: {suggestion}");
                }
            }
            exit_code.into()
        }
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut settings = Settings::load(cli.config.as_deref()).map_err(ResolveError::from)?;
    apply_cli_overrides(&mut settings, &cli);
    logging::init(settings.debug);

    if let Some(path) = &cli.config {
        info!("Using config file: {}", path.display());
    }

    let groups = settings.source_groups();
    let transformations = settings.transformation_list()?;
    let store = open_store(settings.store.as_deref(), &groups)?;

    let mut parameters = resolve(&store, &groups, &transformations, settings.strict)?;
    if settings.expand {
        expand::expand_parameters(&mut parameters);
    }

    match cli.command {
        Commands::Run { command } => {
            let command = if settings.expand {
                expand::expand_args(&command, &parameters)
            } else {
                command
            };
            let (program, args) = command
                .split_first()
                .context("no command given to run")?;
            Ok(exec::replace_process(program, args, &parameters)?)
        }
        Commands::Dotenv { file } => {
            dotenv::write(&file, &parameters)?;
            info!(
                "Wrote {} parameters to {}",
                parameters.len(),
                file.display()
            );
            Ok(ExitCode::Success.into())
        }
        Commands::Print { format } => {
            output::print_parameters(&parameters, format).context("failed to print parameters")?;
            Ok(ExitCode::Success.into())
        }
    }
}

/// Flags given on the command line win over file and environment settings
fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    settings.debug |= cli.debug;
    settings.expand |= cli.expand;
    settings.strict |= cli.strict;
    settings.recursive |= cli.recursive;

    if !cli.path.is_empty() {
        settings.path = cli.path.clone();
    }
    if !cli.name.is_empty() {
        settings.name = cli.name.clone();
    }
    if !cli.plain_path.is_empty() {
        settings.plain_path = cli.plain_path.clone();
    }
    if !cli.plain_name.is_empty() {
        settings.plain_name = cli.plain_name.clone();
    }
    if let Some(store) = &cli.store {
        settings.store = Some(store.clone());
    }
}

fn open_store(path: Option<&Path>, groups: &SourceGroups) -> ResolveResult<FileStore> {
    match path {
        Some(path) => FileStore::load(path),
        None if groups.is_empty() => {
            warn!("No parameters requested; continuing with an empty set");
            Ok(FileStore::new())
        }
        None => Err(ResolveError::Config(Box::new(figment::Error::from(
            "no parameter store configured; pass --store or set SSM_PARENT_STORE".to_string(),
        )))),
    }
}
