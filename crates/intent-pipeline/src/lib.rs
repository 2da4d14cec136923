//! # intent-pipeline — Validate and Combine Intent
//!
//! Drives one run over an intent repository:
//!
//! ```text
//! Init → SchemasLoaded → DocumentsLoaded → Validated → Combined → Reported → {Pass, Fail}
//! ```
//!
//! - [`loader`] reads the VRF registry and the tenant files.
//! - [`combine`] merges them into the combined artifact and persists it.
//! - [`report`] runs the whole sequence and produces the single pass/fail
//!   signal with a persisted [`intent_core::ValidationSummary`].
//!
//! ## Failure Policy
//!
//! Structural problems (bad schema, non-mapping document, discovery
//! mismatch, unwritable output) are [`PipelineError`]s and abort the run
//! without a report. Schema violations never abort: the artifact and the
//! report are always written, and [`RunOutcome::passed`] carries the
//! verdict.

pub mod combine;
pub mod error;
pub mod loader;
pub mod output;
pub mod report;

pub use combine::{check, combine, persist, ArtifactCheck};
pub use error::PipelineError;
pub use loader::{discover_tenant_files, load_tenants, load_vrfs, DocumentLoader};
pub use report::{Reporter, RunOutcome, Stage};
