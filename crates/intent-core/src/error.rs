//! # Error Types — Structural Failures
//!
//! Errors in this module are the fatal class: the pipeline's own inputs or
//! outputs are broken and the run cannot produce a meaningful report.
//! Schema violations are never represented here; see [`crate::Violation`].
//!
//! All errors use `thiserror` and carry the offending file path so the
//! operator can act on the diagnostic without re-running.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or shaping an intent document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("invalid YAML in {}: {reason}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The YAML parsed, but holds a value JSON cannot represent
    /// (non-finite float, complex mapping key).
    #[error("unrepresentable value in {}: {reason}", .path.display())]
    Unrepresentable {
        /// File holding the value.
        path: PathBuf,
        /// What could not be converted.
        reason: String,
    },

    /// A document root that must be a mapping is something else.
    #[error("document {} is not a mapping (found {found})", .path.display())]
    NotAMapping {
        /// Offending document.
        path: PathBuf,
        /// JSON type name of the root that was found.
        found: &'static str,
    },

    /// The VRF document has a `vrfs` member that is not a sequence.
    #[error("VRF document must contain a vrfs list in {} (found {found})", .path.display())]
    VrfsNotSequence {
        /// The VRF document.
        path: PathBuf,
        /// JSON type name of the `vrfs` member.
        found: &'static str,
    },

    /// The tenant directory exists but could not be listed.
    #[error("cannot list tenant directory {}", .dir.display())]
    Discovery {
        /// Directory being scanned.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Failure while writing a pipeline output (combined artifact or report).
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// The value could not be encoded as JSON.
    #[error("cannot encode {}", .path.display())]
    Encode {
        /// Destination that was being written.
        path: PathBuf,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// The parent directory could not be created.
    #[error("cannot create directory {}", .dir.display())]
    CreateDir {
        /// Directory that could not be created.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An existing output could not be read back for comparison.
    #[error("cannot read existing {}", .path.display())]
    Read {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("cannot write {}", .path.display())]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// JSON type name used in diagnostics.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}
