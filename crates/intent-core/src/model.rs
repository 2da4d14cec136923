//! # Intent Data Model
//!
//! Every value here is transient: built fresh for one run, serialized to the
//! combined artifact or the validation report, then dropped.
//!
//! ## Report Shape
//!
//! [`ValidationSummary`] serializes to the fixed report shape consumed by
//! the deployment pipeline:
//!
//! ```json
//! {
//!   "vrfs": {"file": "...", "valid": true, "error_count": 0},
//!   "tenants": [{"file": "...", "valid": false, "error_count": 1}],
//!   "combined_intent": "build/combined.json",
//!   "errors": [{"path": ["tenant"], "message": "...", "validator": "type", "file": "..."}]
//! }
//! ```
//!
//! Field order is the declaration order of the structs below and must not
//! be rearranged.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Violation paths
// ---------------------------------------------------------------------------

/// One step from the document root toward a violating value.
///
/// Array positions serialize as JSON integers and object keys as strings,
/// so `["vrfs", 0, "id"]` is distinguishable from `["vrfs", "0", "id"]`.
///
/// Ordering: every index sorts before every key; indices compare
/// numerically, keys lexicographically. A `Vec<PathToken>` therefore orders
/// lexicographically token by token with shorter prefixes first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathToken {
    /// Position within a sequence.
    Index(u64),
    /// Key within a mapping.
    Key(String),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<&str> for PathToken {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<u64> for PathToken {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single schema violation.
///
/// `file` is set only for violations found in tenant documents; VRF
/// violations omit it from the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Tokens from the document root to the violating value.
    pub path: Vec<PathToken>,
    /// Human-readable description from the schema engine.
    pub message: String,
    /// The schema keyword that failed (`type`, `required`, ...).
    pub validator: String,
    /// Originating tenant file, POSIX-separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Violation {
    /// Attach the originating tenant file.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Render the path as an RFC 6901 JSON Pointer (`""` for the root).
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for token in &self.path {
            out.push('/');
            match token {
                PathToken::Index(i) => out.push_str(&i.to_string()),
                PathToken::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
            }
        }
        out
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}: ")?;
        }
        if self.path.is_empty() {
            write!(f, "(root): {} [{}]", self.message, self.validator)
        } else {
            write!(f, "{}: {} [{}]", self.pointer(), self.message, self.validator)
        }
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// One tenant definition, identified by the file it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantDocument {
    /// File the document was read from.
    pub file: PathBuf,
    /// Document root; always a mapping.
    pub body: Map<String, Value>,
}

impl TenantDocument {
    /// Document root as a JSON value, for schema validation.
    pub fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// The merged snapshot of current intent.
///
/// A pure, order-preserving merge. It carries no validation outcome and may
/// hold documents that fail their schemas. Mapping keys inside the documents
/// are emitted sorted; sequence order is never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedArtifact {
    /// VRF entries in document order.
    #[serde(serialize_with = "crate::canonical::sorted_values")]
    pub vrfs: Vec<Value>,
    /// Tenant document roots in discovery order.
    #[serde(serialize_with = "crate::canonical::sorted_maps")]
    pub tenants: Vec<Map<String, Value>>,
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Validation outcome for one intent document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document location, POSIX-separated.
    pub file: String,
    /// True when the document produced no violations.
    pub valid: bool,
    /// Number of violations found.
    pub error_count: usize,
}

impl DocumentSummary {
    /// Summarize a document from its violation list.
    pub fn from_violations(file: impl Into<String>, violations: &[Violation]) -> Self {
        Self {
            file: file.into(),
            valid: violations.is_empty(),
            error_count: violations.len(),
        }
    }
}

/// The persisted validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Outcome for the global VRF document.
    pub vrfs: DocumentSummary,
    /// Outcome per tenant file, in discovery order.
    pub tenants: Vec<DocumentSummary>,
    /// Where the combined artifact was written.
    pub combined_intent: String,
    /// VRF violations first, then tenant violations in discovery order.
    pub errors: Vec<Violation>,
}

impl ValidationSummary {
    /// True when no document violated its schema.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of violations across all documents.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violation(path: Vec<PathToken>) -> Violation {
        Violation {
            path,
            message: "bad".to_string(),
            validator: "type".to_string(),
            file: None,
        }
    }

    #[test]
    fn test_index_sorts_before_key() {
        assert!(PathToken::Index(99) < PathToken::Key("a".to_string()));
        assert!(PathToken::Index(2) < PathToken::Index(10));
        assert!(PathToken::from("a") < PathToken::from("b"));
    }

    #[test]
    fn test_path_prefix_sorts_first() {
        let short: Vec<PathToken> = vec!["vrfs".into()];
        let long: Vec<PathToken> = vec!["vrfs".into(), 0u64.into()];
        assert!(short < long);
    }

    #[test]
    fn test_path_token_serialization() {
        let path: Vec<PathToken> = vec!["vrfs".into(), 0u64.into(), "id".into()];
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["vrfs", 0, "id"]));

        let back: Vec<PathToken> = serde_json::from_value(json!(["a", 3])).unwrap();
        assert_eq!(back, vec![PathToken::from("a"), PathToken::Index(3)]);
    }

    #[test]
    fn test_violation_without_file_omits_key() {
        let v = violation(vec!["tenant".into()]);
        let value = serde_json::to_value(&v).unwrap();
        assert_eq!(
            value,
            json!({"path": ["tenant"], "message": "bad", "validator": "type"})
        );
    }

    #[test]
    fn test_violation_in_file_serializes_file_last() {
        let v = violation(vec!["tenant".into()]).in_file("intent/tenants/acme.yml");
        let text = serde_json::to_string(&v).unwrap();
        assert_eq!(
            text,
            r#"{"path":["tenant"],"message":"bad","validator":"type","file":"intent/tenants/acme.yml"}"#
        );
    }

    #[test]
    fn test_pointer_escapes_separators() {
        let v = violation(vec!["a/b".into(), "c~d".into(), 1u64.into()]);
        assert_eq!(v.pointer(), "/a~1b/c~0d/1");
    }

    #[test]
    fn test_violation_display_root() {
        let v = violation(Vec::new());
        assert_eq!(v.to_string(), "(root): bad [type]");
    }

    #[test]
    fn test_violation_display_with_file() {
        let v = violation(vec!["tenant".into()]).in_file("intent/tenants/acme.yml");
        assert_eq!(v.to_string(), "intent/tenants/acme.yml: /tenant: bad [type]");
    }

    #[test]
    fn test_document_summary_from_violations() {
        let clean = DocumentSummary::from_violations("intent/vrfs.yml", &[]);
        assert!(clean.valid);
        assert_eq!(clean.error_count, 0);

        let dirty = DocumentSummary::from_violations("x.yml", &[violation(Vec::new())]);
        assert!(!dirty.valid);
        assert_eq!(dirty.error_count, 1);
    }

    #[test]
    fn test_summary_field_order() {
        let summary = ValidationSummary {
            vrfs: DocumentSummary::from_violations("intent/vrfs.yml", &[]),
            tenants: Vec::new(),
            combined_intent: "build/combined.json".to_string(),
            errors: Vec::new(),
        };
        let text = serde_json::to_string(&summary).unwrap();
        let vrfs = text.find("\"vrfs\"").unwrap();
        let tenants = text.find("\"tenants\"").unwrap();
        let combined = text.find("\"combined_intent\"").unwrap();
        let errors = text.find("\"errors\"").unwrap();
        assert!(vrfs < tenants && tenants < combined && combined < errors);
        assert!(summary.passed());
    }

    #[test]
    fn test_combined_artifact_shape() {
        let mut tenant = Map::new();
        tenant.insert("tenant".to_string(), json!("acme"));
        let artifact = CombinedArtifact {
            vrfs: vec![json!({"name": "red", "id": 10})],
            tenants: vec![tenant],
        };
        assert_eq!(
            serde_json::to_value(&artifact).unwrap(),
            json!({"vrfs": [{"name": "red", "id": 10}], "tenants": [{"tenant": "acme"}]})
        );
    }

    #[test]
    fn test_combined_artifact_sorts_document_keys() {
        let mut tenant = Map::new();
        tenant.insert("zone".to_string(), json!(1));
        tenant.insert("address_families".to_string(), json!({"ipv6": true, "ipv4": true}));
        let artifact = CombinedArtifact {
            vrfs: vec![json!({"name": "red", "id": 10})],
            tenants: vec![tenant],
        };
        let text = serde_json::to_string(&artifact).unwrap();
        assert_eq!(
            text,
            r#"{"vrfs":[{"id":10,"name":"red"}],"tenants":[{"address_families":{"ipv4":true,"ipv6":true},"zone":1}]}"#
        );
    }
}
