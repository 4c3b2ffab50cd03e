//! Registry build orchestration
//!
//! A build runs in strict sequence: validate the whole table, write one
//! manifest per component in table order, then write the package manifest.
//! Validation is a full gate: when it fails nothing is written. Write
//! failures are not retried and files written earlier in the same run are
//! left in place.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::descriptor::ComponentTable;
use crate::error::{RegistryError, Result};
use crate::manifest::{RegistryItem, RegistryManifest};
use crate::validator::{RegistryValidator, ValidationReport};

/// Directory (under the package root) holding per-component manifests
pub const REGISTRY_DIR: &str = "registry";

/// Package manifest file name (under the package root)
pub const ROOT_MANIFEST_FILE: &str = "registry.json";

/// A manifest written for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItem {
    pub name: String,
    pub path: PathBuf,
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub items: Vec<GeneratedItem>,
    pub root_manifest: PathBuf,
    /// Non-blocking validation warnings seen before generation
    pub warnings: usize,
}

/// Builds the registry for one package root
pub struct RegistryBuilder {
    root: PathBuf,
    table: ComponentTable,
    validator: RegistryValidator,
    manifest: RegistryManifest,
    strict: bool,
}

impl RegistryBuilder {
    pub fn new(root: impl Into<PathBuf>, table: ComponentTable) -> Self {
        Self {
            root: root.into(),
            table,
            validator: RegistryValidator::new(),
            manifest: RegistryManifest::default(),
            strict: false,
        }
    }

    /// Builder over the table embedded in the library
    pub fn with_embedded_table(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(root, ComponentTable::embedded()?))
    }

    /// Treat validation warnings as blocking
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table(&self) -> &ComponentTable {
        &self.table
    }

    pub fn registry_dir(&self) -> PathBuf {
        self.root.join(REGISTRY_DIR)
    }

    pub fn root_manifest_path(&self) -> PathBuf {
        self.root.join(ROOT_MANIFEST_FILE)
    }

    /// Run every validation rule and log what was found
    pub fn validate(&self) -> ValidationReport {
        info!("Validating source files in {}", self.root.display());

        let report = self.validator.validate(&self.table, &self.root);

        for issue in &report.issues {
            debug!(
                rule = issue.rule_id,
                severity = issue.severity.as_str(),
                "{}",
                issue.message
            );
        }

        if report.total_errors == 0 {
            info!("All source files validated");
        } else {
            warn!(
                "Validation found {} error(s) and {} warning(s)",
                report.total_errors, report.total_warnings
            );
        }

        report
    }

    /// Decide whether a report allows generation
    pub fn gate(&self, report: &ValidationReport) -> Result<()> {
        let missing = report.missing_files().count();

        if missing > 0 && missing == report.total_errors {
            return Err(RegistryError::MissingSourceFiles { count: missing });
        }

        if !report.passes(self.strict) {
            return Err(RegistryError::ValidationFailed {
                errors: report.total_errors,
                warnings: report.total_warnings,
            });
        }

        Ok(())
    }

    /// Validate, then generate. Nothing is written if validation fails.
    pub fn build(&self) -> Result<BuildSummary> {
        let report = self.validate();
        self.gate(&report)?;

        let mut summary = self.generate()?;
        summary.warnings = report.total_warnings;
        Ok(summary)
    }

    /// Write all component manifests and the package manifest
    ///
    /// Does not validate; callers that skip `build` must gate first.
    pub fn generate(&self) -> Result<BuildSummary> {
        info!("Building {} registry", self.manifest.name);

        let items = self.generate_items()?;
        let root_manifest = self.write_root_manifest()?;

        info!(
            "Registry build complete! Generated {} component files.",
            items.len()
        );

        Ok(BuildSummary {
            items,
            root_manifest,
            warnings: 0,
        })
    }

    /// Write `registry/<name>.json` for every component, in table order
    pub fn generate_items(&self) -> Result<Vec<GeneratedItem>> {
        let registry_dir = self.registry_dir();
        ensure_dir(&registry_dir)?;

        let mut generated = Vec::with_capacity(self.table.len());
        for component in &self.table {
            let item = RegistryItem::from_descriptor(component);
            item.validate()?;

            let path = registry_dir.join(item.file_name());
            write_file(&path, &item.to_json()?)?;
            info!("Generated {}", item.file_name());

            generated.push(GeneratedItem {
                name: item.name,
                path,
            });
        }

        Ok(generated)
    }

    /// Overwrite the package manifest
    pub fn write_root_manifest(&self) -> Result<PathBuf> {
        let path = self.root_manifest_path();
        write_file(&path, &self.manifest.to_json()?)?;
        info!("Updated main {}", ROOT_MANIFEST_FILE);
        Ok(path)
    }
}

/// Build the registry for a package root using the embedded table
pub fn build_registry(root: &Path) -> Result<BuildSummary> {
    RegistryBuilder::with_embedded_table(root)?.build()
}

// create_dir_all is a no-op for an existing directory
fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| RegistryError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    debug!("Writing {}", path.display());
    fs::write(path, contents).map_err(|source| RegistryError::Write {
        path: path.to_path_buf(),
        source,
    })
}
