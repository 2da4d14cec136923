//! # Pipeline Errors
//!
//! The fatal class. Anything here aborts a run before a report is written.

use std::path::PathBuf;

use intent_core::{ArtifactError, DocumentError};
use intent_schema::SchemaError;
use thiserror::Error;

/// A structural or configuration failure that aborts the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The report directory could not be created.
    #[error("cannot prepare report directory {}", .dir.display())]
    ReportDir {
        /// Directory that could not be created.
        dir: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A schema is unreadable or malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An intent document is unreadable or has the wrong shape.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Tenant discovery and tenant loading disagree.
    #[error(
        "tenant file discovery does not match loaded tenant documents \
         ({discovered} file(s) discovered, {loaded} document(s) loaded); \
         verify the contents of {}",
        .dir.display()
    )]
    DiscoveryMismatch {
        /// Files found by discovery.
        discovered: usize,
        /// Documents returned by the loader.
        loaded: usize,
        /// Tenant directory.
        dir: PathBuf,
    },

    /// An output file could not be written.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}
