//! # intent-cli — Fabric Intent Command-Line Interface
//!
//! Provides the `intent` binary. Handlers return an exit code and leave
//! process setup (logging, working directory) to `main`.
//!
//! ## Subcommands
//!
//! - `intent validate` — schema-check every intent document, write the
//!   combined artifact and the validation report.
//! - `intent combine` — write the combined artifact without validating.
//! - `intent combine --check` — verify the artifact on disk is current.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | validation failure, or stale artifact under `--check` |
//! | 2 | fatal configuration or I/O error |
//!
//! ```bash
//! intent validate
//! intent -v validate --tenant-dir intent/tenants
//! intent combine --check
//! ```

pub mod combine;
pub mod paths;
pub mod validate;
