//! # YAML Intent Documents
//!
//! Intent is authored in YAML but validated and emitted as JSON. This module
//! reads a YAML file and converts its value tree into `serde_json::Value`.
//!
//! ## Loading Rules
//!
//! - An empty document (no content, or only `null`) reads as an empty
//!   mapping, so a blank file never fails to load.
//! - Merge keys (`<<: *defaults`) are expanded before conversion. Keys set
//!   explicitly in the mapping win over merged ones.
//! - Scalar mapping keys become strings (`1` becomes `"1"`); tags are
//!   dropped in favour of the tagged value.

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::DocumentError;

/// Read and parse a YAML document, converting it to JSON.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read,
/// [`DocumentError::Parse`] for malformed YAML or an invalid merge, and
/// [`DocumentError::Unrepresentable`] when the tree holds a value with no
/// JSON equivalent.
pub fn read_yaml_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let parse_error = |e: serde_yaml::Error| DocumentError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let mut yaml: serde_yaml::Value = serde_yaml::from_str(&content).map_err(parse_error)?;
    yaml.apply_merge().map_err(parse_error)?;

    match yaml_to_json(&yaml) {
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(json) => Ok(json),
        Err(reason) => Err(DocumentError::Unrepresentable {
            path: path.to_path_buf(),
            reason,
        }),
    }
}

/// Convert a `serde_yaml::Value` tree to a `serde_json::Value` tree.
///
/// Merge keys are not expanded here; [`read_yaml_document`] does that
/// before calling in.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(flag) => Value::Bool(*flag),
        Yaml::Number(n) => Value::Number(json_number(n)?),
        Yaml::String(text) => Value::String(text.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                object.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

fn json_number(n: &serde_yaml::Number) -> Result<Number, String> {
    if let Some(signed) = n.as_i64() {
        return Ok(signed.into());
    }
    if let Some(unsigned) = n.as_u64() {
        return Ok(unsigned.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("number {n} has no JSON representation"))
}

fn mapping_key(key: &serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(text) => Ok(text.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(flag) => Ok(flag.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            Err("sequence or mapping used as a mapping key".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_yaml_to_json_conversion() {
        let yaml_str = r#"
name: red
id: 10
enabled: true
ratio: 0.5
targets:
  - "65000:10"
  - "65000:20"
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "red",
                "id": 10,
                "enabled": true,
                "ratio": 0.5,
                "targets": ["65000:10", "65000:20"]
            })
        );
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes-key\n").unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value["1"], "one");
        assert_eq!(value["true"], "yes-key");
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("x: .nan\n").unwrap();
        assert!(yaml_to_json(&yaml).is_err());
    }

    #[test]
    fn test_empty_file_reads_as_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.yml", "");
        assert_eq!(read_yaml_document(&path).unwrap(), json!({}));

        let path = write(&dir, "blank.yml", "\n   \n");
        assert_eq!(read_yaml_document(&path).unwrap(), json!({}));
    }

    #[test]
    fn test_explicit_null_reads_as_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "null.yml", "~\n");
        assert_eq!(read_yaml_document(&path).unwrap(), json!({}));
    }

    #[test]
    fn test_sequence_root_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "list.yml", "- a\n- b\n");
        assert_eq!(read_yaml_document(&path).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.yml", "key: [unclosed\n");
        let err = read_yaml_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn test_merge_keys_are_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "acme.yml",
            "defaults: &d {mtu: 9000, name: base}\nvrf:\n  <<: *d\n  name: red\n",
        );
        let doc = read_yaml_document(&path).unwrap();
        assert_eq!(doc["vrf"], json!({"mtu": 9000, "name": "red"}));
        assert!(doc["vrf"].get("<<").is_none());
    }

    #[test]
    fn test_merge_of_scalar_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad-merge.yml", "vrf:\n  <<: 5\n  name: red\n");
        let err = read_yaml_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn test_complex_key_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: pair\n").unwrap();
        assert!(yaml_to_json(&yaml).is_err());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = read_yaml_document(Path::new("/nonexistent/vrfs.yml")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
