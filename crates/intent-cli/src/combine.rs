//! # Combine Subcommand
//!
//! Writes the combined intent artifact without reading any schema. With
//! `--check` the artifact is rendered in memory and compared byte for byte
//! against the file on disk, which is left untouched.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use intent_core::{posix_display, IntentPaths};
use intent_pipeline::{check, combine, persist, ArtifactCheck, DocumentLoader};

use crate::paths::SourceArgs;

/// Arguments for the `intent combine` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CombineArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Verify the existing artifact matches instead of writing it.
    #[arg(long)]
    pub check: bool,
}

impl CombineArgs {
    /// `base` with this command's flags applied.
    pub fn resolve(&self, base: &IntentPaths) -> IntentPaths {
        let mut paths = base.clone();
        self.sources.apply(&mut paths);
        paths
    }

    /// Relative flag paths re-anchored under `invoked_from`.
    pub fn rebased(&self, invoked_from: &Path) -> Self {
        Self {
            sources: self.sources.rebased(invoked_from),
            check: self.check,
        }
    }
}

/// Execute the combine subcommand.
///
/// Returns exit code: 0 on success, 1 if `--check` finds the artifact stale
/// or missing. Load and write failures are returned as `Err`.
pub fn run_combine(args: &CombineArgs, base: &IntentPaths) -> Result<u8> {
    let paths = args.resolve(base);
    let loader = DocumentLoader::new(&paths);
    let vrfs = loader.load_vrfs().context("failed to load VRF document")?;
    let tenants = loader
        .load_tenants()
        .context("failed to load tenant documents")?;
    let artifact = combine(vrfs, tenants);
    let destination = posix_display(&paths.combined_output);

    if !args.check {
        persist(&artifact, &paths.combined_output)
            .context("failed to write combined intent")?;
        println!("Wrote combined intent to {destination}");
        return Ok(0);
    }

    match check(&artifact, &paths.combined_output)
        .context("failed to compare combined intent")?
    {
        ArtifactCheck::Fresh { sha256 } => {
            println!("OK: combined intent is up to date ({destination})");
            tracing::debug!(sha256 = %sha256, "artifact digest");
            Ok(0)
        }
        ArtifactCheck::Stale { expected, found } => {
            println!("FAIL: combined intent is outdated: {destination}");
            println!("  Expected digest: {expected}");
            println!("  Existing digest: {found}");
            Ok(1)
        }
        ArtifactCheck::Missing { expected } => {
            println!("FAIL: combined intent does not exist: {destination}");
            println!("  Expected digest: {expected}");
            Ok(1)
        }
    }
}
