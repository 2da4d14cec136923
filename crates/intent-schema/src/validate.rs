//! # Schema Validation
//!
//! Loads schema files, rejects malformed ones, and validates documents into
//! sorted [`Violation`] lists.
//!
//! ## Error Classes
//!
//! A schema that cannot be read, is not JSON, fails its meta-schema, or does
//! not compile is a [`SchemaError`]. These are configuration failures and
//! abort a run. A document that fails a well-formed schema is ordinary data:
//! [`SchemaValidator::validate`] never fails, it returns violations.
//!
//! ## Ordering
//!
//! Violations are sorted by their token path (stable, so equal paths keep
//! engine order). Path tokens are resolved against the document itself, so
//! `/vrfs/0` becomes `["vrfs", 0]` when `vrfs` is a sequence but
//! `["vrfs", "0"]` when it is a mapping with key `"0"`.

use std::fmt;
use std::path::{Path, PathBuf};

use intent_core::{PathToken, Violation};
use serde_json::Value;
use thiserror::Error;

use crate::draft202012::Draft202012;
use crate::engine::{RawViolation, SchemaEngine};

/// Configuration failure while preparing a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("cannot read schema {}", .path.display())]
    Read {
        /// Schema location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("schema {} is not valid JSON: {reason}", .path.display())]
    Parse {
        /// Schema location.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The schema is not a well-formed schema for the engine's draft.
    #[error("schema {} is malformed ({engine}): {reason}", .path.display())]
    Malformed {
        /// Schema location.
        path: PathBuf,
        /// Engine that rejected it.
        engine: &'static str,
        /// Meta-schema diagnostic.
        reason: String,
    },

    /// The schema passed its meta-schema but could not be compiled
    /// (unresolvable reference, invalid regular expression).
    #[error("schema {} failed to compile: {reason}", .path.display())]
    Compile {
        /// Schema location.
        path: PathBuf,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// A checked, compiled schema.
pub struct Schema<C> {
    location: PathBuf,
    source: Value,
    compiled: C,
}

impl<C> Schema<C> {
    /// Where the schema was loaded from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The schema document as parsed.
    pub fn source(&self) -> &Value {
        &self.source
    }
}

impl<C> fmt::Debug for Schema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Validates documents against schemas through a [`SchemaEngine`].
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator<E = Draft202012> {
    engine: E,
}

impl SchemaValidator<Draft202012> {
    /// A validator using the Draft 2020-12 engine.
    pub fn new() -> Self {
        Self {
            engine: Draft202012,
        }
    }
}

impl<E: SchemaEngine> SchemaValidator<E> {
    /// A validator using a specific engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Read, check and compile the schema at `location`.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`]; all are fatal configuration errors.
    pub fn load_schema(&self, location: &Path) -> Result<Schema<E::Compiled>, SchemaError> {
        let content = std::fs::read_to_string(location).map_err(|source| SchemaError::Read {
            path: location.to_path_buf(),
            source,
        })?;
        let source: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
            path: location.to_path_buf(),
            reason: e.to_string(),
        })?;
        let schema = self.compile_value(source, location)?;
        tracing::debug!(
            schema = %location.display(),
            engine = self.engine.name(),
            "loaded schema"
        );
        Ok(schema)
    }

    /// Check and compile an already-parsed schema. `location` names the
    /// schema in diagnostics and anchors sibling references.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Malformed`] or [`SchemaError::Compile`].
    pub fn compile_value(
        &self,
        source: Value,
        location: &Path,
    ) -> Result<Schema<E::Compiled>, SchemaError> {
        self.engine
            .check_schema(&source)
            .map_err(|reason| SchemaError::Malformed {
                path: location.to_path_buf(),
                engine: self.engine.name(),
                reason,
            })?;

        let base_dir = location
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let compiled = self
            .engine
            .compile(&source, base_dir)
            .map_err(|reason| SchemaError::Compile {
                path: location.to_path_buf(),
                reason,
            })?;

        Ok(Schema {
            location: location.to_path_buf(),
            source,
            compiled,
        })
    }

    /// Every violation `document` produces against `schema`, sorted by path.
    pub fn validate(&self, document: &Value, schema: &Schema<E::Compiled>) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .engine
            .iterate_errors(&schema.compiled, document)
            .into_iter()
            .map(|raw| into_violation(document, raw))
            .collect();
        violations.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::debug!(
            schema = %schema.location.display(),
            violations = violations.len(),
            "validated document"
        );
        violations
    }
}

fn into_violation(document: &Value, raw: RawViolation) -> Violation {
    Violation {
        path: resolve_path(document, &raw.instance_pointer),
        message: raw.message,
        validator: raw.keyword,
        file: None,
    }
}

/// Turn a JSON Pointer into tokens, typing each segment by the value it
/// indexes into.
fn resolve_path(document: &Value, pointer: &str) -> Vec<PathToken> {
    if pointer.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut current = Some(document);
    for raw in pointer.trim_start_matches('/').split('/') {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        match current {
            Some(Value::Array(items)) => match segment.parse::<u64>() {
                Ok(index) => {
                    current = usize::try_from(index).ok().and_then(|i| items.get(i));
                    tokens.push(PathToken::Index(index));
                }
                Err(_) => {
                    current = None;
                    tokens.push(PathToken::Key(segment));
                }
            },
            Some(Value::Object(map)) => {
                current = map.get(&segment);
                tokens.push(PathToken::Key(segment));
            }
            _ => {
                current = None;
                tokens.push(PathToken::Key(segment));
            }
        }
    }
    tokens
}
