//! # Path Resolution
//!
//! Builds the [`IntentPaths`] a command runs with: built-in defaults, then
//! an optional `--config` YAML file, then per-path flags.
//!
//! ## Working Directory
//!
//! Without `--config` the binary moves to the intent repository root so the
//! relative defaults resolve there. Relative flag paths still mean what the
//! user typed: they are rebased from the directory `intent` was invoked in,
//! so `--vrf-file my-vrfs.yml` run from `<repo>/work` reads
//! `work/my-vrfs.yml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use intent_core::IntentPaths;

/// Document and artifact locations shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// VRF registry document.
    #[arg(long, value_name = "PATH")]
    pub vrf_file: Option<PathBuf>,

    /// Directory holding one document per tenant.
    #[arg(long, value_name = "DIR")]
    pub tenant_dir: Option<PathBuf>,

    /// File extension of tenant documents, without the dot.
    #[arg(long, value_name = "EXT")]
    pub tenant_extension: Option<String>,

    /// Output path for the combined intent artifact.
    #[arg(long, value_name = "PATH")]
    pub combined_out: Option<PathBuf>,
}

impl SourceArgs {
    /// Apply the flags that were given on top of `paths`.
    pub fn apply(&self, paths: &mut IntentPaths) {
        if let Some(p) = &self.vrf_file {
            paths.vrf_document = p.clone();
        }
        if let Some(p) = &self.tenant_dir {
            paths.tenant_dir = p.clone();
        }
        if let Some(ext) = &self.tenant_extension {
            paths.tenant_extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(p) = &self.combined_out {
            paths.combined_output = p.clone();
        }
    }

    /// Relative flag paths re-anchored under `invoked_from`.
    pub fn rebased(&self, invoked_from: &Path) -> Self {
        Self {
            vrf_file: rebase(&self.vrf_file, invoked_from),
            tenant_dir: rebase(&self.tenant_dir, invoked_from),
            tenant_extension: self.tenant_extension.clone(),
            combined_out: rebase(&self.combined_out, invoked_from),
        }
    }
}

/// Schema and report locations, used only by `validate`.
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// JSON Schema for the VRF document.
    #[arg(long, value_name = "PATH")]
    pub vrf_schema: Option<PathBuf>,

    /// JSON Schema for each tenant document.
    #[arg(long, value_name = "PATH")]
    pub tenant_schema: Option<PathBuf>,

    /// Output path for the validation report.
    #[arg(long, value_name = "PATH")]
    pub report_out: Option<PathBuf>,
}

impl SchemaArgs {
    /// Apply the flags that were given on top of `paths`.
    pub fn apply(&self, paths: &mut IntentPaths) {
        if let Some(p) = &self.vrf_schema {
            paths.vrf_schema = p.clone();
        }
        if let Some(p) = &self.tenant_schema {
            paths.tenant_schema = p.clone();
        }
        if let Some(p) = &self.report_out {
            paths.report_output = p.clone();
        }
    }

    /// Relative flag paths re-anchored under `invoked_from`.
    pub fn rebased(&self, invoked_from: &Path) -> Self {
        Self {
            vrf_schema: rebase(&self.vrf_schema, invoked_from),
            tenant_schema: rebase(&self.tenant_schema, invoked_from),
            report_out: rebase(&self.report_out, invoked_from),
        }
    }
}

fn rebase(path: &Option<PathBuf>, invoked_from: &Path) -> Option<PathBuf> {
    path.as_ref().map(|p| {
        if p.is_absolute() || invoked_from.as_os_str().is_empty() {
            p.clone()
        } else {
            invoked_from.join(p)
        }
    })
}

/// Defaults, overridden by the config file at `config` when given.
pub fn base_paths(config: Option<&Path>) -> Result<IntentPaths> {
    match config {
        Some(path) => IntentPaths::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(IntentPaths::default()),
    }
}

/// Walk up from `start` to the first directory holding both `intent/` and
/// `schemas/`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("intent").is_dir() && dir.join("schemas").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Move the process to the intent repository root above the current
/// directory.
///
/// Returns where the command was invoked, relative to the new working
/// directory (empty when no move happened). Pass it to `rebased` so
/// relative flag paths keep their meaning.
pub fn enter_repo_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let Some(root) = find_repo_root(&cwd) else {
        tracing::warn!("could not locate intent repository root; using current directory");
        return Ok(PathBuf::new());
    };
    if root == cwd {
        return Ok(PathBuf::new());
    }

    std::env::set_current_dir(&root)
        .with_context(|| format!("cannot enter {}", root.display()))?;
    tracing::debug!(repo_root = %root.display(), "resolved repository root");
    Ok(cwd
        .strip_prefix(&root)
        .map_or_else(|_| cwd.clone(), Path::to_path_buf))
}
