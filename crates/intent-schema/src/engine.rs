//! # Schema Engine Capability
//!
//! The narrow interface between the validator and a concrete JSON Schema
//! implementation.

use std::path::Path;

use serde_json::Value;

/// A violation as reported by an engine, before path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawViolation {
    /// JSON Pointer to the violating value in the document (`""` for root).
    pub instance_pointer: String,
    /// The schema keyword that failed.
    pub keyword: String,
    /// Human-readable description.
    pub message: String,
}

/// A JSON Schema implementation.
pub trait SchemaEngine {
    /// Engine-specific compiled form of a schema.
    type Compiled;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Check that `schema` is itself a well-formed schema for the engine's
    /// draft. Returns a diagnostic on failure.
    fn check_schema(&self, schema: &Value) -> Result<(), String>;

    /// Compile a checked schema. `base_dir` is the directory the schema was
    /// loaded from, for resolving references to sibling schema files.
    fn compile(&self, schema: &Value, base_dir: &Path) -> Result<Self::Compiled, String>;

    /// Every violation `document` produces, in engine order.
    fn iterate_errors(&self, compiled: &Self::Compiled, document: &Value) -> Vec<RawViolation>;
}
