//! Validation rules for registry components

use super::{Severity, ValidationContext, ValidationIssue, ValidationRule};
use crate::descriptor::{component_name_problem, is_package_relative, ComponentDescriptor};

/// Rule: every listed source file must exist under the package root
pub struct SourceFileExistsRule;

impl SourceFileExistsRule {
    pub const RULE_ID: &'static str = "source-file-exists";
}

impl ValidationRule for SourceFileExistsRule {
    fn rule_id(&self) -> &'static str {
        Self::RULE_ID
    }

    fn description(&self) -> &'static str {
        "Every file listed by a component must exist in the package"
    }

    fn check(
        &self,
        component: &ComponentDescriptor,
        ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationIssue> {
        component
            .files
            .iter()
            // Paths that escape the root are reported by SourcePathRule
            .filter(|file| is_package_relative(&file.path))
            .filter(|file| !ctx.root.join(&file.path).is_file())
            .map(|file| ValidationIssue {
                severity: Severity::Error,
                rule_id: self.rule_id(),
                component: component.name.clone(),
                message: format!(
                    "Missing source file: {} for component {}",
                    file.path, component.name
                ),
            })
            .collect()
    }
}

/// Rule: source paths are relative and stay under the package root
pub struct SourcePathRule;

impl ValidationRule for SourcePathRule {
    fn rule_id(&self) -> &'static str {
        "source-path"
    }

    fn description(&self) -> &'static str {
        "File paths must be relative to the package root without '..' segments"
    }

    fn check(
        &self,
        component: &ComponentDescriptor,
        _ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationIssue> {
        component
            .files
            .iter()
            .filter(|file| !is_package_relative(&file.path))
            .map(|file| ValidationIssue {
                severity: Severity::Error,
                rule_id: self.rule_id(),
                component: component.name.clone(),
                message: format!(
                    "Source path {} for component {} must be relative to the package root",
                    file.path, component.name
                ),
            })
            .collect()
    }
}

/// Rule: component names are lowercase kebab-case
pub struct ComponentNameRule;

impl ValidationRule for ComponentNameRule {
    fn rule_id(&self) -> &'static str {
        "component-name"
    }

    fn description(&self) -> &'static str {
        "Component names must be lowercase alphanumeric with hyphens"
    }

    fn check(
        &self,
        component: &ComponentDescriptor,
        _ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationIssue> {
        component_name_problem(&component.name)
            .map(|message| ValidationIssue {
                severity: Severity::Error,
                rule_id: self.rule_id(),
                component: component.name.clone(),
                message,
            })
            .into_iter()
            .collect()
    }
}

/// Rule: registry dependencies point at components of the same table
///
/// A dangling name still produces a usable manifest, so this is a warning
/// unless the build runs in strict mode.
pub struct RegistryDependencyRule;

impl ValidationRule for RegistryDependencyRule {
    fn rule_id(&self) -> &'static str {
        "registry-dependency"
    }

    fn description(&self) -> &'static str {
        "Registry dependencies must name components in the same registry"
    }

    fn check(
        &self,
        component: &ComponentDescriptor,
        ctx: &ValidationContext<'_>,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for dependency in &component.registry_dependencies {
            let message = if dependency == &component.name {
                format!("Component {} lists itself as a registry dependency", component.name)
            } else if !ctx.table.contains(dependency) {
                format!(
                    "Unknown registry dependency '{}' for component {}",
                    dependency, component.name
                )
            } else {
                continue;
            };

            issues.push(ValidationIssue {
                severity: Severity::Warning,
                rule_id: self.rule_id(),
                component: component.name.clone(),
                message,
            });
        }

        issues
    }
}
