//! build-registry - generates the medusa-forms component registry
//!
//! With no arguments, validates every source file listed in the embedded
//! component table against the current directory and writes
//! `registry/<component>.json` plus `registry.json`.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use forms_registry_core::{ComponentTable, RegistryBuilder, Severity, ValidationReport};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "build-registry",
    about = "Validate component sources and generate the medusa-forms registry",
    version
)]
struct Cli {
    /// Package root that component file paths are relative to
    #[clap(long, default_value = ".")]
    root: PathBuf,

    /// Load the component table from a YAML file instead of the built-in one
    #[clap(long)]
    table: Option<PathBuf>,

    /// Validate only, do not write any registry file
    #[clap(long)]
    check: bool,

    /// Fail on validation warnings (e.g. unknown registry dependencies)
    #[clap(long)]
    strict: bool,

    /// Output the validation report as JSON
    #[clap(long)]
    json: bool,

    /// Print the component table and exit
    #[clap(long, conflicts_with_all = ["check", "json", "strict"])]
    list: bool,

    /// Set log level
    #[clap(long, default_value = "warn")]
    log_level: LogLevel,
}

/// Initialize tracing from the --log-level flag
///
/// RUST_LOG directives are added on top of the flag. Logs go to stderr so
/// stdout stays clean for --json.
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(extra) = std::env::var("RUST_LOG") {
        for directive in extra.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let table = load_table(cli.table.as_deref())?;

    if cli.list {
        print_component_table(&table);
        return Ok(());
    }

    let builder = RegistryBuilder::new(&cli.root, table).strict(cli.strict);
    let quiet = cli.json;

    if !quiet {
        println!("🔍 Validating source files...");
    }

    let report = builder.validate();

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report_to_json(&report))?
        );
    } else {
        print_validation_results(&report);
    }

    if let Err(e) = builder.gate(&report) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    if cli.check {
        return Ok(());
    }

    if !quiet {
        println!("🏗️  Building medusa-forms registry...");
    }

    let summary = builder
        .generate()
        .with_context(|| format!("Registry build failed in {}", cli.root.display()))?;

    if !quiet {
        for item in &summary.items {
            println!("✅ Generated {}.json", item.name);
        }
        println!("✅ Updated main registry.json");
        println!(
            "🎉 Registry build complete! Generated {} component files.",
            summary.items.len()
        );
    }

    Ok(())
}

fn load_table(path: Option<&Path>) -> Result<ComponentTable> {
    match path {
        Some(path) => {
            debug!("Loading component table from {:?}", path);
            ComponentTable::from_file(path)
                .with_context(|| format!("Invalid component table {}", path.display()))
        }
        None => ComponentTable::embedded().context("Built-in component table is invalid"),
    }
}

fn print_validation_results(report: &ValidationReport) {
    for issue in &report.issues {
        match issue.severity {
            Severity::Error => eprintln!("❌ {}", issue.message),
            Severity::Warning => eprintln!("⚠ {}", issue.message),
        }
    }

    if report.total_errors == 0 {
        if report.total_warnings == 0 {
            println!("✅ All source files validated");
        } else {
            println!(
                "✅ All source files validated ({} warnings)",
                report.total_warnings
            );
        }
    }
}

fn report_to_json(report: &ValidationReport) -> serde_json::Value {
    serde_json::json!({
        "root": report.root.display().to_string(),
        "components_checked": report.components_checked,
        "total_errors": report.total_errors,
        "total_warnings": report.total_warnings,
        "issues": report.issues.iter().map(|i| {
            serde_json::json!({
                "severity": i.severity.as_str(),
                "rule_id": i.rule_id,
                "component": i.component,
                "message": i.message,
            })
        }).collect::<Vec<_>>()
    })
}

// Table row structure for component display
#[derive(Tabled)]
struct ComponentTableRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Dependencies")]
    dependencies: String,
    #[tabled(rename = "Registry Dependencies")]
    registry_dependencies: String,
    #[tabled(rename = "Files")]
    files: String,
}

fn print_component_table(table: &ComponentTable) {
    let rows: Vec<ComponentTableRow> = table
        .iter()
        .map(|c| ComponentTableRow {
            name: c.name.clone(),
            dependencies: c.dependencies.join(", "),
            registry_dependencies: c.registry_dependencies.join(", "),
            files: c
                .files
                .iter()
                .map(|f| f.path.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();

    let rendered = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("Found {} components\n", table.len());
    println!("{rendered}");
}
