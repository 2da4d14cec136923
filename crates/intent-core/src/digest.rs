//! # Content Digest
//!
//! SHA-256 over encoded output bytes, rendered as lowercase hex. Used to
//! identify a combined artifact in logs and in stale-artifact diagnostics.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: impl AsRef<[u8]>) -> String {
    let digest = Sha256::digest(bytes.as_ref());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
