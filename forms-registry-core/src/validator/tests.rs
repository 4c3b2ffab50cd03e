//! Tests for the registry validator

use super::rules::*;
use super::*;
use crate::descriptor::FileRef;
use std::fs;
use tempfile::TempDir;

fn component(name: &str, registry_deps: &[&str], paths: &[&str]) -> ComponentDescriptor {
    ComponentDescriptor {
        name: name.to_string(),
        description: format!("{name} component"),
        dependencies: vec!["@medusajs/ui".to_string()],
        registry_dependencies: registry_deps.iter().map(|d| d.to_string()).collect(),
        files: paths
            .iter()
            .map(|p| FileRef {
                name: Path::new(p).file_name().unwrap().to_string_lossy().to_lowercase(),
                path: p.to_string(),
            })
            .collect(),
    }
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "export {}\n").unwrap();
}

#[test]
fn test_source_file_rule_passes_when_present() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/ui/Label.tsx");

    let table =
        ComponentTable::from_descriptors(vec![component("label", &[], &["src/ui/Label.tsx"])])
            .unwrap();
    let ctx = ValidationContext {
        table: &table,
        root: temp_dir.path(),
    };

    let issues = SourceFileExistsRule.check(table.get("label").unwrap(), &ctx);
    assert!(issues.is_empty(), "Should not report files that exist");
}

#[test]
fn test_source_file_rule_reports_every_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/ui/FieldWrapper.tsx");

    let table = ComponentTable::from_descriptors(vec![component(
        "field-wrapper",
        &[],
        &[
            "src/ui/FieldWrapper.tsx",
            "src/ui/types.d.ts",
            "src/ui/Missing.tsx",
        ],
    )])
    .unwrap();
    let ctx = ValidationContext {
        table: &table,
        root: temp_dir.path(),
    };

    let issues = SourceFileExistsRule.check(table.get("field-wrapper").unwrap(), &ctx);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| i.severity == Severity::Error));
    assert_eq!(
        issues[0].message,
        "Missing source file: src/ui/types.d.ts for component field-wrapper"
    );
    assert_eq!(issues[1].rule_id, "source-file-exists");
}

#[test]
fn test_source_file_rule_rejects_directories() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src/ui/Input.tsx")).unwrap();

    let table =
        ComponentTable::from_descriptors(vec![component("input", &[], &["src/ui/Input.tsx"])])
            .unwrap();
    let ctx = ValidationContext {
        table: &table,
        root: temp_dir.path(),
    };

    assert_eq!(
        SourceFileExistsRule
            .check(table.get("input").unwrap(), &ctx)
            .len(),
        1
    );
}

#[test]
fn test_source_paths_must_stay_under_root() {
    let package = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    touch(outside.path(), "Outside.tsx");
    touch(package.path(), "src/ui/Input.tsx");

    let absolute = outside.path().join("Outside.tsx");
    let absolute = absolute.to_str().unwrap();
    let table = ComponentTable::from_descriptors(vec![
        component("outside", &[], &[absolute]),
        component("parent", &[], &["src/../../Outside.tsx"]),
        component("input", &[], &["./src/ui/Input.tsx"]),
    ])
    .unwrap();

    let report = RegistryValidator::new().validate(&table, package.path());

    let flagged: Vec<&str> = report
        .errors()
        .filter(|i| i.rule_id == "source-path")
        .map(|i| i.component.as_str())
        .collect();
    assert_eq!(flagged, vec!["outside", "parent"]);
    // An escaping path is never resolved, so it is not also reported as missing
    assert_eq!(report.missing_files().count(), 0);
    assert_eq!(report.total_errors, 2);
    assert!(!report.passes(false));
}

#[test]
fn test_component_name_rule() {
    let temp_dir = TempDir::new().unwrap();
    let table = ComponentTable::from_descriptors(vec![
        component("controlled-input", &[], &[]),
        component("Controlled_Input", &[], &[]),
        component("-input", &[], &[]),
        component("", &[], &[]),
    ])
    .unwrap();
    let ctx = ValidationContext {
        table: &table,
        root: temp_dir.path(),
    };

    let messages: Vec<String> = table
        .iter()
        .flat_map(|c| ComponentNameRule.check(c, &ctx))
        .map(|i| i.message)
        .collect();

    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("lowercase"));
    assert!(messages[1].contains("hyphen"));
    assert_eq!(messages[2], "Component name is required");
}

#[test]
fn test_registry_dependency_rule_flags_dangling_and_self_references() {
    let temp_dir = TempDir::new().unwrap();
    let table = ComponentTable::from_descriptors(vec![
        component("label", &[], &[]),
        component("field-wrapper", &["label", "field-eror"], &[]),
        component("loop", &["loop"], &[]),
    ])
    .unwrap();
    let ctx = ValidationContext {
        table: &table,
        root: temp_dir.path(),
    };

    let wrapper_issues = RegistryDependencyRule.check(table.get("field-wrapper").unwrap(), &ctx);
    assert_eq!(wrapper_issues.len(), 1);
    assert_eq!(wrapper_issues[0].severity, Severity::Warning);
    assert!(wrapper_issues[0].message.contains("'field-eror'"));

    let loop_issues = RegistryDependencyRule.check(table.get("loop").unwrap(), &ctx);
    assert_eq!(loop_issues.len(), 1);
    assert!(loop_issues[0].message.contains("itself"));
}

#[test]
fn test_report_counts_and_strictness() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/ui/Label.tsx");

    let table = ComponentTable::from_descriptors(vec![
        component("label", &["tooltip"], &["src/ui/Label.tsx"]),
        component("input", &["label"], &["src/ui/Input.tsx"]),
    ])
    .unwrap();

    let report = RegistryValidator::new().validate(&table, temp_dir.path());
    assert_eq!(report.components_checked, 2);
    assert_eq!(report.total_errors, 1);
    assert_eq!(report.total_warnings, 1);
    assert_eq!(report.missing_files().count(), 1);
    assert!(!report.passes(false));

    touch(temp_dir.path(), "src/ui/Input.tsx");
    let report = RegistryValidator::new().validate(&table, temp_dir.path());
    assert!(report.passes(false));
    assert!(!report.passes(true));
    assert_eq!(report.warnings().next().unwrap().component, "label");
}

#[test]
fn test_embedded_table_has_no_dangling_dependencies() {
    let temp_dir = TempDir::new().unwrap();
    let table = ComponentTable::embedded().unwrap();

    let report = RegistryValidator::with_rules(vec![
        Box::new(ComponentNameRule),
        Box::new(RegistryDependencyRule),
    ])
    .validate(&table, temp_dir.path());

    assert!(report.issues.is_empty(), "{:?}", report.issues);
}
