//! # Draft 2020-12 Engine
//!
//! [`SchemaEngine`] backed by the `jsonschema` crate, pinned to Draft
//! 2020-12 regardless of any `$schema` declared in the document.
//!
//! ## Reference Resolution
//!
//! Intent schemas may `$ref` sibling files (`common.schema.json`). A local
//! retriever maps every external reference to a file of the same name in
//! the referencing schema's directory. No network requests are ever made;
//! an unresolvable reference fails compilation, which the validator reports
//! as a configuration error.

use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use crate::engine::{RawViolation, SchemaEngine};

/// Keywords that can be the failing location of an error. When the schema
/// path ends in anything else the failing schema is a boolean `false`.
const ASSERTION_KEYWORDS: &[&str] = &[
    "$ref",
    "additionalProperties",
    "allOf",
    "anyOf",
    "const",
    "contains",
    "contentEncoding",
    "contentMediaType",
    "dependentRequired",
    "dependentSchemas",
    "else",
    "enum",
    "exclusiveMaximum",
    "exclusiveMinimum",
    "format",
    "if",
    "items",
    "maxContains",
    "maxItems",
    "maxLength",
    "maxProperties",
    "maximum",
    "minContains",
    "minItems",
    "minLength",
    "minProperties",
    "minimum",
    "multipleOf",
    "not",
    "oneOf",
    "pattern",
    "patternProperties",
    "prefixItems",
    "propertyNames",
    "required",
    "then",
    "type",
    "unevaluatedItems",
    "unevaluatedProperties",
    "uniqueItems",
];

/// Retriever that resolves `$ref` URIs to files beside the root schema.
struct SiblingSchemaRetriever {
    base_dir: PathBuf,
}

impl Retrieve for SiblingSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let without_fragment = uri_str.split('#').next().unwrap_or(uri_str);
        let filename = without_fragment
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .ok_or_else(|| format!("cannot resolve schema reference: {uri_str}"))?;

        let path = self.base_dir.join(filename);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            format!(
                "cannot resolve schema reference {uri_str} to {}: {e}",
                path.display()
            )
        })?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("referenced schema {} is not JSON: {e}", path.display()))?;
        tracing::debug!(uri = uri_str, path = %path.display(), "resolved schema reference");
        Ok(value)
    }
}

/// The JSON Schema Draft 2020-12 engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Draft202012;

impl SchemaEngine for Draft202012 {
    type Compiled = Validator;

    fn name(&self) -> &'static str {
        "draft2020-12"
    }

    fn check_schema(&self, schema: &Value) -> Result<(), String> {
        if !matches!(schema, Value::Object(_) | Value::Bool(_)) {
            return Err("a schema must be a JSON object or boolean".to_string());
        }
        jsonschema::meta::validate(schema).map_err(|e| {
            let at = e.instance_path.to_string();
            if at.is_empty() {
                e.to_string()
            } else {
                format!("{at}: {e}")
            }
        })
    }

    fn compile(&self, schema: &Value, base_dir: &Path) -> Result<Validator, String> {
        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .with_retriever(SiblingSchemaRetriever {
                base_dir: base_dir.to_path_buf(),
            })
            .build(schema)
            .map_err(|e| e.to_string())
    }

    fn iterate_errors(&self, compiled: &Validator, document: &Value) -> Vec<RawViolation> {
        compiled
            .iter_errors(document)
            .map(|err| RawViolation {
                instance_pointer: err.instance_path.to_string(),
                keyword: keyword_of(&err.schema_path.to_string()),
                message: err.to_string(),
            })
            .collect()
    }
}

/// The failing keyword named by a schema-side JSON Pointer.
fn keyword_of(schema_pointer: &str) -> String {
    let last = schema_pointer.rsplit('/').next().unwrap_or_default();
    if ASSERTION_KEYWORDS.contains(&last) {
        last.to_string()
    } else {
        "false".to_string()
    }
}
