//! Registry Validator - pre-build checks over the component table
//!
//! Runs every rule over every component and collects all issues instead of
//! stopping at the first one, so a maintainer can fix several broken paths
//! in one pass. The validator never halts the process; callers decide what
//! to do with the report.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod rules;

#[cfg(test)]
mod tests;

use crate::descriptor::{ComponentDescriptor, ComponentTable};
use rules::*;

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,   // Blocks the build
    Warning, // Blocks the build only in strict mode
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A validation issue found in a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Unique identifier for the rule that raised it
    pub rule_id: &'static str,
    /// Component the issue belongs to
    pub component: String,
    /// Human-readable description
    pub message: String,
}

/// What a rule can see while checking a component
pub struct ValidationContext<'a> {
    pub table: &'a ComponentTable,
    /// Package root that file paths are resolved against
    pub root: &'a Path,
}

/// Trait for validation rules
pub trait ValidationRule: Send + Sync {
    /// Check one component for issues
    fn check(&self, component: &ComponentDescriptor, ctx: &ValidationContext<'_>)
        -> Vec<ValidationIssue>;

    /// Rule identifier
    fn rule_id(&self) -> &'static str;

    /// Rule description
    fn description(&self) -> &'static str;
}

/// Validation results for the whole table
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub root: PathBuf,
    pub issues: Vec<ValidationIssue>,
    pub components_checked: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// Issues raised by the source file check
    pub fn missing_files(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.rule_id == SourceFileExistsRule::RULE_ID)
    }

    /// Whether generation may proceed
    pub fn passes(&self, strict: bool) -> bool {
        self.total_errors == 0 && (!strict || self.total_warnings == 0)
    }
}

/// Main registry validator
pub struct RegistryValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl RegistryValidator {
    /// Create validator with the default registry rules
    pub fn new() -> Self {
        let rules: Vec<Box<dyn ValidationRule>> = vec![
            Box::new(ComponentNameRule),
            Box::new(SourcePathRule),
            Box::new(SourceFileExistsRule),
            Box::new(RegistryDependencyRule),
        ];

        Self { rules }
    }

    /// Create validator with a custom rule set
    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    /// Validate every component of the table against the package root
    pub fn validate(&self, table: &ComponentTable, root: &Path) -> ValidationReport {
        info!("Validating {} components", table.len());

        let ctx = ValidationContext { table, root };
        let mut issues = Vec::new();

        for component in table {
            debug!("Validating component: {}", component.name);
            for rule in &self.rules {
                issues.extend(rule.check(component, &ctx));
            }
        }

        let total_errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let total_warnings = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();

        ValidationReport {
            root: root.to_path_buf(),
            issues,
            components_checked: table.len(),
            total_errors,
            total_warnings,
        }
    }
}

impl Default for RegistryValidator {
    fn default() -> Self {
        Self::new()
    }
}
