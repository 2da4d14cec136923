//! # Document Loader
//!
//! Reads the global VRF document and the per-tenant documents. Loading is a
//! pure read; any failure here is fatal for the run because every later
//! stage assumes well-shaped input.
//!
//! ## Shapes
//!
//! - VRF document: a mapping (or an empty file). Its `vrfs` member must be a
//!   sequence when present; an absent `vrfs` reads as an empty sequence.
//! - Tenant document: one per `*.<ext>` file directly inside the tenant
//!   directory, root must be a mapping. Files are taken in file-name order;
//!   dot-files are ignored.

use std::path::{Path, PathBuf};

use intent_core::error::json_type_name;
use intent_core::{read_yaml_document, DocumentError, IntentPaths, TenantDocument};
use serde_json::Value;

/// Loader bound to one repository's document locations.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    vrf_document: PathBuf,
    tenant_dir: PathBuf,
    tenant_extension: String,
}

impl DocumentLoader {
    /// Bind to the document locations in `paths`.
    pub fn new(paths: &IntentPaths) -> Self {
        Self {
            vrf_document: paths.vrf_document.clone(),
            tenant_dir: paths.tenant_dir.clone(),
            tenant_extension: paths.tenant_extension.clone(),
        }
    }

    /// The VRF document location.
    pub fn vrf_document(&self) -> &Path {
        &self.vrf_document
    }

    /// The tenant directory.
    pub fn tenant_dir(&self) -> &Path {
        &self.tenant_dir
    }

    /// See [`load_vrfs`].
    pub fn load_vrfs(&self) -> Result<Vec<Value>, DocumentError> {
        load_vrfs(&self.vrf_document)
    }

    /// See [`discover_tenant_files`].
    pub fn discover_tenant_files(&self) -> Result<Vec<PathBuf>, DocumentError> {
        discover_tenant_files(&self.tenant_dir, &self.tenant_extension)
    }

    /// See [`load_tenants`].
    pub fn load_tenants(&self) -> Result<Vec<TenantDocument>, DocumentError> {
        load_tenants(&self.tenant_dir, &self.tenant_extension)
    }
}

/// Load the `vrfs` sequence from the VRF document at `location`.
///
/// # Errors
///
/// [`DocumentError::NotAMapping`] when the root is neither a mapping nor
/// empty, [`DocumentError::VrfsNotSequence`] when `vrfs` is present but not
/// a sequence, plus any read or parse error.
pub fn load_vrfs(location: &Path) -> Result<Vec<Value>, DocumentError> {
    let document = read_yaml_document(location)?;
    let mut root = match document {
        Value::Object(root) => root,
        other => {
            return Err(DocumentError::NotAMapping {
                path: location.to_path_buf(),
                found: json_type_name(&other),
            })
        }
    };

    match root.remove("vrfs") {
        None => {
            tracing::debug!(path = %location.display(), "VRF document has no vrfs key");
            Ok(Vec::new())
        }
        Some(Value::Array(vrfs)) => {
            tracing::debug!(path = %location.display(), count = vrfs.len(), "loaded VRFs");
            Ok(vrfs)
        }
        Some(other) => Err(DocumentError::VrfsNotSequence {
            path: location.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// List tenant files in `directory` with the given extension, sorted.
///
/// A missing directory yields no files.
///
/// # Errors
///
/// [`DocumentError::Discovery`] when the directory exists but cannot be
/// listed.
pub fn discover_tenant_files(
    directory: &Path,
    extension: &str,
) -> Result<Vec<PathBuf>, DocumentError> {
    if !directory.is_dir() {
        tracing::warn!(
            dir = %directory.display(),
            "tenant directory not found; treating as empty"
        );
        return Ok(Vec::new());
    }

    let discovery_error = |source: std::io::Error| DocumentError::Discovery {
        dir: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(discovery_error)? {
        let path = entry.map_err(discovery_error)?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every tenant document in `directory`, in file-name order.
///
/// # Errors
///
/// [`DocumentError::NotAMapping`] naming the first tenant file whose root is
/// not a mapping, plus any discovery, read or parse error.
pub fn load_tenants(
    directory: &Path,
    extension: &str,
) -> Result<Vec<TenantDocument>, DocumentError> {
    let files = discover_tenant_files(directory, extension)?;
    let mut tenants = Vec::with_capacity(files.len());
    for file in files {
        match read_yaml_document(&file)? {
            Value::Object(body) => {
                tracing::debug!(path = %file.display(), "loaded tenant document");
                tenants.push(TenantDocument { file, body });
            }
            other => {
                return Err(DocumentError::NotAMapping {
                    path: file,
                    found: json_type_name(&other),
                })
            }
        }
    }
    Ok(tenants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(path: &Path, body: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn test_load_vrfs_returns_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "vrfs:\n  - name: red\n    id: 10\n  - name: blue\n    id: 20\n");
        let vrfs = load_vrfs(&path).unwrap();
        assert_eq!(
            vrfs,
            vec![json!({"name": "red", "id": 10}), json!({"name": "blue", "id": 20})]
        );
    }

    #[test]
    fn test_load_vrfs_missing_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "description: no vrfs here\n");
        assert!(load_vrfs(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_vrfs_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "");
        assert!(load_vrfs(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_vrfs_mapping_member_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "vrfs:\n  red: 10\n");
        let err = load_vrfs(&path).unwrap_err();
        assert!(
            matches!(err, DocumentError::VrfsNotSequence { found: "mapping", .. }),
            "got: {err}"
        );
    }

    #[test]
    fn test_load_vrfs_scalar_member_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "vrfs: red\n");
        let err = load_vrfs(&path).unwrap_err();
        assert!(matches!(err, DocumentError::VrfsNotSequence { .. }), "got: {err}");
    }

    #[test]
    fn test_load_vrfs_sequence_root_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrfs.yml");
        write(&path, "- name: red\n");
        let err = load_vrfs(&path).unwrap_err();
        assert!(matches!(err, DocumentError::NotAMapping { .. }), "got: {err}");
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let tenants = dir.path().join("tenants");
        write(&tenants.join("zeta.yml"), "tenant: zeta\n");
        write(&tenants.join("acme.yml"), "tenant: acme\n");
        write(&tenants.join("notes.txt"), "ignored\n");
        write(&tenants.join("legacy.yaml"), "tenant: legacy\n");
        write(&tenants.join(".hidden.yml"), "tenant: hidden\n");
        std::fs::create_dir_all(tenants.join("nested.yml")).unwrap();

        let files = discover_tenant_files(&tenants, "yml").unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["acme.yml", "zeta.yml"]);
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let files = discover_tenant_files(&dir.path().join("absent"), "yml").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_load_tenants_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let tenants = dir.path().join("tenants");
        write(&tenants.join("b.yml"), "tenant: bravo\n");
        write(&tenants.join("a.yml"), "tenant: alpha\n");
        write(&tenants.join("c.yml"), "");

        let loaded = load_tenants(&tenants, "yml").unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].file, tenants.join("a.yml"));
        assert_eq!(loaded[0].body["tenant"], "alpha");
        assert_eq!(loaded[1].body["tenant"], "bravo");
        assert!(loaded[2].body.is_empty());
    }

    #[test]
    fn test_load_tenants_expands_shared_anchors() {
        let dir = tempfile::tempdir().unwrap();
        let tenants = dir.path().join("tenants");
        write(
            &tenants.join("acme.yml"),
            "defaults: &d {mtu: 9000}\nvrf:\n  <<: *d\n  name: red\n",
        );

        let loaded = load_tenants(&tenants, "yml").unwrap();
        assert_eq!(loaded[0].body["vrf"], json!({"mtu": 9000, "name": "red"}));
    }

    #[test]
    fn test_load_tenants_non_mapping_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let tenants = dir.path().join("tenants");
        write(&tenants.join("acme.yml"), "tenant: acme\n");
        write(&tenants.join("broken.yml"), "- not\n- a mapping\n");

        let err = load_tenants(&tenants, "yml").unwrap_err();
        match err {
            DocumentError::NotAMapping { path, found } => {
                assert_eq!(path, tenants.join("broken.yml"));
                assert_eq!(found, "sequence");
            }
            other => panic!("expected NotAMapping, got: {other}"),
        }
    }

    #[test]
    fn test_loader_uses_configured_extension() {
        let dir = tempfile::tempdir().unwrap();
        let paths = IntentPaths {
            vrf_document: dir.path().join("vrfs.yml"),
            tenant_dir: dir.path().join("tenants"),
            tenant_extension: "yaml".to_string(),
            ..IntentPaths::default()
        };
        write(&paths.tenant_dir.join("acme.yaml"), "tenant: acme\n");
        write(&paths.tenant_dir.join("other.yml"), "tenant: other\n");
        write(&paths.vrf_document, "vrfs: []\n");

        let loader = DocumentLoader::new(&paths);
        assert_eq!(loader.vrf_document(), paths.vrf_document.as_path());
        assert_eq!(loader.tenant_dir(), paths.tenant_dir.as_path());
        assert!(loader.load_vrfs().unwrap().is_empty());
        let tenants = loader.load_tenants().unwrap();
        assert_eq!(tenants.len(), 1);
        assert_eq!(tenants[0].body["tenant"], "acme");
        assert_eq!(loader.discover_tenant_files().unwrap().len(), 1);
    }
}
