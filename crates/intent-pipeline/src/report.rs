//! # Validation Reporter
//!
//! Runs the full pipeline and produces the one authoritative pass/fail
//! signal.
//!
//! ## Sequence
//!
//! 1. Create the report directory.
//! 2. Load and check both schemas. A bad schema aborts before any document
//!    is read.
//! 3. Load the VRF document and every tenant document.
//! 4. Cross-check tenant discovery against the loaded documents.
//! 5. Validate `{"vrfs": [...]}` against the VRF schema, then each tenant
//!    against the tenant schema, in discovery order.
//! 6. Combine and persist the artifact, whatever step 5 found.
//! 7. Assemble and persist the [`ValidationSummary`].
//!
//! Steps 1 to 4 fail with a [`PipelineError`] and leave no report. Once step 5
//! is reached a report is always written; [`RunOutcome::passed`] is false
//! whenever the summary lists at least one violation.

use std::fmt;
use std::path::{Path, PathBuf};

use intent_core::{posix_display, DocumentSummary, IntentPaths, ValidationSummary, Violation};
use intent_schema::{Draft202012, SchemaEngine, SchemaValidator};
use serde_json::json;

use crate::combine::{combine, persist};
use crate::error::PipelineError;
use crate::loader::DocumentLoader;
use crate::output;

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing done yet.
    Init,
    /// Both schemas checked and compiled.
    SchemasLoaded,
    /// VRF and tenant documents loaded and cross-checked.
    DocumentsLoaded,
    /// Every document validated.
    Validated,
    /// Combined artifact written.
    Combined,
    /// Report written.
    Reported,
}

impl Stage {
    /// Stage name as used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::SchemasLoaded => "schemas-loaded",
            Self::DocumentsLoaded => "documents-loaded",
            Self::Validated => "validated",
            Self::Combined => "combined",
            Self::Reported => "reported",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed run: the summary and where it was written.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The persisted summary.
    pub summary: ValidationSummary,
    /// Location of the report file.
    pub report_path: PathBuf,
}

impl RunOutcome {
    /// True when no document violated its schema.
    pub fn passed(&self) -> bool {
        self.summary.passed()
    }

    /// Total violations across all documents.
    pub fn error_count(&self) -> usize {
        self.summary.error_count()
    }

    /// One-line diagnostic for a failed run.
    pub fn failure_message(&self) -> String {
        format!(
            "Intent schema validation failed with {} issue(s). See {} for details.",
            self.error_count(),
            posix_display(&self.report_path)
        )
    }
}

/// Drives one validate-then-combine run.
#[derive(Debug, Clone)]
pub struct Reporter<E = Draft202012> {
    paths: IntentPaths,
    validator: SchemaValidator<E>,
}

impl Reporter<Draft202012> {
    /// A reporter over `paths` using the Draft 2020-12 engine.
    pub fn new(paths: IntentPaths) -> Self {
        Self {
            paths,
            validator: SchemaValidator::new(),
        }
    }
}

impl<E: SchemaEngine> Reporter<E> {
    /// A reporter with a specific validator.
    pub fn with_validator(paths: IntentPaths, validator: SchemaValidator<E>) -> Self {
        Self { paths, validator }
    }

    /// The configured locations.
    pub fn paths(&self) -> &IntentPaths {
        &self.paths
    }

    /// Run the pipeline.
    ///
    /// # Errors
    ///
    /// Any [`PipelineError`]. Schema violations are not errors; they are in
    /// the returned outcome.
    pub fn run(&self) -> Result<RunOutcome, PipelineError> {
        let paths = &self.paths;
        tracing::debug!(stage = %Stage::Init, "starting intent validation");

        let report_path = paths.report_output.clone();
        ensure_report_dir(&report_path)?;

        let vrf_schema = self.validator.load_schema(&paths.vrf_schema)?;
        let tenant_schema = self.validator.load_schema(&paths.tenant_schema)?;
        tracing::info!(stage = %Stage::SchemasLoaded, "schemas loaded");

        let loader = DocumentLoader::new(paths);
        let vrfs = loader.load_vrfs()?;
        let tenants = loader.load_tenants()?;
        let tenant_files = loader.discover_tenant_files()?;
        if tenant_files.len() != tenants.len() {
            return Err(PipelineError::DiscoveryMismatch {
                discovered: tenant_files.len(),
                loaded: tenants.len(),
                dir: loader.tenant_dir().to_path_buf(),
            });
        }
        tracing::info!(
            stage = %Stage::DocumentsLoaded,
            vrfs = vrfs.len(),
            tenants = tenants.len(),
            "documents loaded"
        );

        let vrf_errors = self
            .validator
            .validate(&json!({ "vrfs": vrfs }), &vrf_schema);
        let vrf_summary =
            DocumentSummary::from_violations(posix_display(&paths.vrf_document), &vrf_errors);

        let mut tenant_summaries = Vec::with_capacity(tenants.len());
        let mut tenant_errors: Vec<Violation> = Vec::new();
        for (file, tenant) in tenant_files.iter().zip(&tenants) {
            let file = posix_display(file);
            let errors = self.validator.validate(&tenant.to_value(), &tenant_schema);
            if !errors.is_empty() {
                tracing::debug!(file = %file, violations = errors.len(), "tenant failed validation");
            }
            tenant_summaries.push(DocumentSummary::from_violations(file.clone(), &errors));
            tenant_errors.extend(errors.into_iter().map(|e| e.in_file(file.clone())));
        }
        tracing::info!(
            stage = %Stage::Validated,
            vrf_errors = vrf_errors.len(),
            tenant_errors = tenant_errors.len(),
            "validation complete"
        );

        let artifact = combine(vrfs, tenants);
        let combined_path = persist(&artifact, &paths.combined_output)?;
        tracing::info!(stage = %Stage::Combined, path = %combined_path.display(), "artifact combined");

        let mut errors = vrf_errors;
        errors.extend(tenant_errors);
        let summary = ValidationSummary {
            vrfs: vrf_summary,
            tenants: tenant_summaries,
            combined_intent: posix_display(&combined_path),
            errors,
        };
        output::write_json(&summary, &report_path)?;
        tracing::info!(
            stage = %Stage::Reported,
            path = %report_path.display(),
            errors = summary.error_count(),
            "report written"
        );

        Ok(RunOutcome {
            summary,
            report_path,
        })
    }
}

fn ensure_report_dir(report_path: &Path) -> Result<(), PipelineError> {
    match report_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| PipelineError::ReportDir {
                dir: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Init < Stage::SchemasLoaded);
        assert!(Stage::SchemasLoaded < Stage::DocumentsLoaded);
        assert!(Stage::DocumentsLoaded < Stage::Validated);
        assert!(Stage::Validated < Stage::Combined);
        assert!(Stage::Combined < Stage::Reported);
        assert_eq!(Stage::DocumentsLoaded.to_string(), "documents-loaded");
    }

    #[test]
    fn test_failure_message() {
        let outcome = RunOutcome {
            summary: ValidationSummary {
                vrfs: DocumentSummary::from_violations("intent/vrfs.yml", &[]),
                tenants: Vec::new(),
                combined_intent: "build/combined.json".to_string(),
                errors: vec![Violation {
                    path: Vec::new(),
                    message: "\"tenant\" is a required property".to_string(),
                    validator: "required".to_string(),
                    file: Some("intent/tenants/acme.yml".to_string()),
                }],
            },
            report_path: PathBuf::from("artifacts/intent-validation.json"),
        };
        assert!(!outcome.passed());
        assert_eq!(
            outcome.failure_message(),
            "Intent schema validation failed with 1 issue(s). \
             See artifacts/intent-validation.json for details."
        );
    }

    #[test]
    fn test_ensure_report_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("artifacts/intent-validation.json");
        ensure_report_dir(&report).unwrap();
        ensure_report_dir(&report).unwrap();
        assert!(dir.path().join("artifacts").is_dir());
    }
}
