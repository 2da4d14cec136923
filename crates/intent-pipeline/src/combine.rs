//! # Intent Combiner
//!
//! Merges the VRF list and the tenant documents into one
//! [`CombinedArtifact`] and persists it. Combining is independent of
//! validation: invalid documents are combined exactly like valid ones, so
//! the artifact always shows what would be deployed.

use std::path::{Path, PathBuf};

use intent_core::{sha256_hex, ArtifactError, CombinedArtifact, TenantDocument};
use serde_json::Value;

use crate::output;

/// Merge VRFs and tenants, preserving order, without inspecting content.
pub fn combine(vrfs: Vec<Value>, tenants: Vec<TenantDocument>) -> CombinedArtifact {
    CombinedArtifact {
        vrfs,
        tenants: tenants.into_iter().map(|t| t.body).collect(),
    }
}

/// Write `artifact` to `destination` and return the location written.
///
/// Persisting the same artifact twice yields byte-identical files.
///
/// # Errors
///
/// Any [`ArtifactError`].
pub fn persist(artifact: &CombinedArtifact, destination: &Path) -> Result<PathBuf, ArtifactError> {
    let encoded = output::write_json(artifact, destination)?;
    tracing::info!(
        path = %destination.display(),
        vrfs = artifact.vrfs.len(),
        tenants = artifact.tenants.len(),
        sha256 = %sha256_hex(&encoded),
        "wrote combined intent"
    );
    Ok(destination.to_path_buf())
}

/// Result of comparing an artifact with the file at its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactCheck {
    /// The file on disk matches byte for byte.
    Fresh {
        /// SHA-256 of the file.
        sha256: String,
    },
    /// The file exists but differs.
    Stale {
        /// SHA-256 of the freshly rendered artifact.
        expected: String,
        /// SHA-256 of the file on disk.
        found: String,
    },
    /// Nothing exists at the destination.
    Missing {
        /// SHA-256 of the freshly rendered artifact.
        expected: String,
    },
}

impl ArtifactCheck {
    /// True when the file on disk is current.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh { .. })
    }
}

/// Render `artifact` and compare it with `destination` without writing.
///
/// # Errors
///
/// [`ArtifactError::Encode`], or [`ArtifactError::Read`] when the
/// destination exists but cannot be read.
pub fn check(artifact: &CombinedArtifact, destination: &Path) -> Result<ArtifactCheck, ArtifactError> {
    let encoded = output::encode(artifact, destination)?;
    let expected = sha256_hex(&encoded);

    let on_disk = match std::fs::read(destination) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ArtifactCheck::Missing { expected });
        }
        Err(source) => {
            return Err(ArtifactError::Read {
                path: destination.to_path_buf(),
                source,
            })
        }
    };

    if on_disk == encoded.as_bytes() {
        Ok(ArtifactCheck::Fresh { sha256: expected })
    } else {
        Ok(ArtifactCheck::Stale {
            expected,
            found: sha256_hex(&on_disk),
        })
    }
}
