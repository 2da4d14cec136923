//! # Output Files
//!
//! Shared writer for the combined artifact and the validation report. Each
//! output is encoded once through [`CanonicalJson`] and written whole.
//! Missing parent directories are created; existing ones are fine.
//!
//! No locking is done. Two concurrent runs against the same output paths
//! race and the last writer wins.

use std::path::Path;

use intent_core::{ArtifactError, CanonicalJson};
use serde::Serialize;

/// Encode `value` canonically.
///
/// # Errors
///
/// [`ArtifactError::Encode`] naming `destination`.
pub fn encode(value: &impl Serialize, destination: &Path) -> Result<CanonicalJson, ArtifactError> {
    CanonicalJson::new(value).map_err(|source| ArtifactError::Encode {
        path: destination.to_path_buf(),
        source,
    })
}

/// Create the parent directory of `path` if it does not exist.
///
/// # Errors
///
/// [`ArtifactError::CreateDir`].
pub fn ensure_parent_dir(path: &Path) -> Result<(), ArtifactError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| ArtifactError::CreateDir {
                dir: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write already-encoded bytes to `destination`, creating its directory.
///
/// # Errors
///
/// [`ArtifactError::CreateDir`] or [`ArtifactError::Write`].
pub fn write_encoded(encoded: &CanonicalJson, destination: &Path) -> Result<(), ArtifactError> {
    ensure_parent_dir(destination)?;
    std::fs::write(destination, encoded.as_bytes()).map_err(|source| ArtifactError::Write {
        path: destination.to_path_buf(),
        source,
    })
}

/// Encode and write `value` to `destination`.
///
/// # Errors
///
/// Any [`ArtifactError`].
pub fn write_json(value: &impl Serialize, destination: &Path) -> Result<CanonicalJson, ArtifactError> {
    let encoded = encode(value, destination)?;
    write_encoded(&encoded, destination)?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a/b/out.json");
        write_json(&json!({"k": 1}), &dest).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "{\n  \"k\": 1\n}\n");
    }

    #[test]
    fn test_existing_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.json");
        ensure_parent_dir(&dest).unwrap();
        ensure_parent_dir(&dest).unwrap();
        write_json(&json!([]), &dest).unwrap();
        write_json(&json!([]), &dest).unwrap();
        assert!(dest.is_file());
    }

    #[test]
    fn test_bare_filename_has_no_parent_to_create() {
        assert!(ensure_parent_dir(Path::new("out.json")).is_ok());
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("build");
        std::fs::write(&blocker, "not a directory").unwrap();
        let err = write_json(&json!({}), &blocker.join("combined.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::CreateDir { .. }), "got: {err}");
    }
}
