//! # intent CLI entry point
//!
//! Parses command-line arguments, initialises logging, settles the working
//! directory and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use intent_cli::combine::{run_combine, CombineArgs};
use intent_cli::paths::{base_paths, enter_repo_root};
use intent_cli::validate::{run_validate, ValidateArgs};

/// Fabric intent toolchain.
///
/// Validates VRF and tenant intent documents against their JSON Schemas and
/// produces the combined intent artifact consumed by deployment.
#[derive(Parser, Debug)]
#[command(name = "intent", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML file overriding the default input and output locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate intent documents, write the combined artifact and the report.
    Validate(ValidateArgs),

    /// Write the combined intent artifact, or verify it with --check.
    Combine(CombineArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = invocation_dir(&cli)
        .and_then(|invoked_from| {
            let base = base_paths(cli.config.as_deref())?;
            match &cli.command {
                Commands::Validate(args) => run_validate(&args.rebased(&invoked_from), &base),
                Commands::Combine(args) => run_combine(&args.rebased(&invoked_from), &base),
            }
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("fatal: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Without `--config`, run from the nearest ancestor that looks like an
/// intent repository so the relative defaults resolve. With it, stay put.
fn invocation_dir(cli: &Cli) -> anyhow::Result<PathBuf> {
    if cli.config.is_some() {
        return Ok(PathBuf::new());
    }
    enter_repo_root()
}
