//! # intent-schema — Schema Validation for Intent Documents
//!
//! Checks intent documents against externally authored JSON Schemas and
//! reduces every failure to a [`intent_core::Violation`].
//!
//! ## Engine Seam (`engine`)
//!
//! [`SchemaEngine`] is the capability the rest of the pipeline relies on:
//! check that a schema is well formed, compile it, and iterate every error a
//! document produces. [`Draft202012`] implements it with the `jsonschema`
//! crate; another draft or engine can be dropped in without touching the
//! reporter.
//!
//! ## Validation (`validate`)
//!
//! [`SchemaValidator`] owns an engine and adds the contract the report
//! depends on:
//!
//! - a malformed schema is a [`SchemaError`], never a document violation;
//! - all violations are collected, not just the first;
//! - violations are sorted by path, so identical input yields an identical
//!   report.

pub mod draft202012;
pub mod engine;
pub mod validate;

pub use draft202012::Draft202012;
pub use engine::{RawViolation, SchemaEngine};
pub use validate::{Schema, SchemaError, SchemaValidator};
