//! # intent-core — Foundational Types for Fabric Intent Validation
//!
//! Defines the data model shared by every stage of the intent pipeline:
//! the per-document and combined outputs, the violation record produced by
//! schema validation, and the structured errors raised while reading intent
//! documents or writing pipeline outputs.
//!
//! ## Key Design Principles
//!
//! 1. **Violations are data, not errors.** A schema violation is a
//!    [`Violation`] value collected into the report. Only structural problems
//!    (unreadable files, non-mapping roots) surface as `Err`.
//!
//! 2. **Paths are token sequences.** A violation location is a
//!    `Vec<PathToken>`, never a dotted string, so keys containing separators
//!    stay unambiguous and ordering is well defined.
//!
//! 3. **One encoding path for outputs.** Every file the pipeline writes goes
//!    through [`CanonicalJson::new`]: sorted keys, two-space indent,
//!    trailing newline. Identical input produces identical bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `intent-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod config;
pub mod digest;
pub mod error;
pub mod model;
pub mod yaml;

pub use canonical::{CanonicalJson, SortedKeys};
pub use config::{posix_display, IntentPaths};
pub use digest::sha256_hex;
pub use error::{ArtifactError, DocumentError};
pub use model::{
    CombinedArtifact, DocumentSummary, PathToken, TenantDocument, ValidationSummary, Violation,
};
pub use yaml::{read_yaml_document, yaml_to_json};
