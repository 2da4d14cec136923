//! # Validate Subcommand
//!
//! Runs the full validate-then-combine pipeline. The summary JSON goes to
//! stdout on success; the failure line goes to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use intent_core::IntentPaths;
use intent_pipeline::Reporter;

use crate::paths::{SchemaArgs, SourceArgs};

/// Arguments for the `intent validate` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub schemas: SchemaArgs,
}

impl ValidateArgs {
    /// `base` with this command's flags applied.
    pub fn resolve(&self, base: &IntentPaths) -> IntentPaths {
        let mut paths = base.clone();
        self.sources.apply(&mut paths);
        self.schemas.apply(&mut paths);
        paths
    }

    /// Relative flag paths re-anchored under `invoked_from`.
    pub fn rebased(&self, invoked_from: &Path) -> Self {
        Self {
            sources: self.sources.rebased(invoked_from),
            schemas: self.schemas.rebased(invoked_from),
        }
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every document is valid, 1 when any document
/// violates its schema. Fatal pipeline errors are returned as `Err`.
pub fn run_validate(args: &ValidateArgs, base: &IntentPaths) -> Result<u8> {
    let paths = args.resolve(base);
    let outcome = Reporter::new(paths)
        .run()
        .context("intent validation aborted")?;

    if outcome.passed() {
        let rendered = serde_json::to_string_pretty(&outcome.summary)
            .context("failed to render validation summary")?;
        println!("{rendered}");
        Ok(0)
    } else {
        eprintln!("{}", outcome.failure_message());
        Ok(1)
    }
}
