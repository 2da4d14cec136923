//! # Path Configuration
//!
//! Every location the pipeline reads or writes, passed explicitly to the
//! loader and reporter. The defaults reproduce the conventional intent
//! repository layout:
//!
//! ```text
//! intent/vrfs.yml                  VRF registry
//! intent/tenants/*.yml             one file per tenant
//! schemas/vrf.schema.json          VRF-list schema
//! schemas/tenant.schema.json       tenant schema
//! build/combined.json              combined artifact
//! artifacts/intent-validation.json validation report
//! ```
//!
//! A YAML config file may override any subset of keys; unknown keys are
//! rejected so a typo cannot silently fall back to a default.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Default VRF registry location.
pub const DEFAULT_VRF_DOCUMENT: &str = "intent/vrfs.yml";
/// Default tenant directory.
pub const DEFAULT_TENANT_DIR: &str = "intent/tenants";
/// Default tenant file extension (without the dot).
pub const DEFAULT_TENANT_EXTENSION: &str = "yml";
/// Default VRF-list schema location.
pub const DEFAULT_VRF_SCHEMA: &str = "schemas/vrf.schema.json";
/// Default tenant schema location.
pub const DEFAULT_TENANT_SCHEMA: &str = "schemas/tenant.schema.json";
/// Default combined artifact location.
pub const DEFAULT_COMBINED_OUTPUT: &str = "build/combined.json";
/// Default validation report location.
pub const DEFAULT_REPORT_OUTPUT: &str = "artifacts/intent-validation.json";

/// Locations of every pipeline input and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntentPaths {
    /// The global VRF document.
    pub vrf_document: PathBuf,
    /// Directory scanned for tenant documents.
    pub tenant_dir: PathBuf,
    /// Extension a tenant file must carry, without the leading dot.
    pub tenant_extension: String,
    /// Schema applied to `{"vrfs": [...]}`.
    pub vrf_schema: PathBuf,
    /// Schema applied to each tenant document.
    pub tenant_schema: PathBuf,
    /// Where the combined artifact is written.
    pub combined_output: PathBuf,
    /// Where the validation report is written.
    pub report_output: PathBuf,
}

impl Default for IntentPaths {
    fn default() -> Self {
        Self {
            vrf_document: PathBuf::from(DEFAULT_VRF_DOCUMENT),
            tenant_dir: PathBuf::from(DEFAULT_TENANT_DIR),
            tenant_extension: DEFAULT_TENANT_EXTENSION.to_string(),
            vrf_schema: PathBuf::from(DEFAULT_VRF_SCHEMA),
            tenant_schema: PathBuf::from(DEFAULT_TENANT_SCHEMA),
            combined_output: PathBuf::from(DEFAULT_COMBINED_OUTPUT),
            report_output: PathBuf::from(DEFAULT_REPORT_OUTPUT),
        }
    }
}

impl IntentPaths {
    /// Load overrides from a YAML config file. Absent keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Read`] if the file cannot be read and
    /// [`DocumentError::Parse`] if it is not valid YAML or names an unknown
    /// key. An empty file yields the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| DocumentError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Re-anchor every relative path under `root`. Absolute paths are kept.
    pub fn rooted_at(&self, root: &Path) -> Self {
        let anchor = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };
        Self {
            vrf_document: anchor(&self.vrf_document),
            tenant_dir: anchor(&self.tenant_dir),
            tenant_extension: self.tenant_extension.clone(),
            vrf_schema: anchor(&self.vrf_schema),
            tenant_schema: anchor(&self.tenant_schema),
            combined_output: anchor(&self.combined_output),
            report_output: anchor(&self.report_output),
        }
    }
}

/// Render a path with `/` separators regardless of platform, for report
/// entries (`intent/tenants/acme.yml`).
pub fn posix_display(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::CurDir => {}
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    if out.is_empty() {
        out.push('.');
    }
    out
}
