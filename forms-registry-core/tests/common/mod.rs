//! Test helper functions for integration tests
//!
//! Shared across test files using the tests/common/ pattern.

#![allow(dead_code)]

use anyhow::Result;
use forms_registry_core::ComponentTable;
use std::fs;
use std::path::Path;
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Create every source file the table references under `root`
pub fn create_package_sources(root: &Path, table: &ComponentTable) -> Result<()> {
    for component in table {
        for file in &component.files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("// {}\nexport {{}};\n", file.name))?;
        }
    }
    Ok(())
}

/// Read every file of a directory into (file name, contents) pairs, sorted by name
pub fn read_dir_contents(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut contents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        contents.push((name, fs::read_to_string(entry.path())?));
    }
    contents.sort();
    Ok(contents)
}
