//! Component descriptor table (components.yaml)
//!
//! The table lists every publishable component of the package together
//! with its package dependencies, the other registry components it builds
//! on, and the source files it is made of. The default table is embedded
//! at compile time; iteration order is declaration order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path};
use tracing::debug;

use crate::error::{RegistryError, Result};

/// The table shipped with the package
const EMBEDDED_TABLE: &str = include_str!("../components.yaml");

/// A file belonging to a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Published file name
    pub name: String,

    /// Path relative to the package root
    pub path: String,
}

/// One publishable UI unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Unique kebab-case identifier
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// External packages required at consumption time
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Other components of this registry this one depends on
    #[serde(default)]
    pub registry_dependencies: Vec<String>,

    /// Source files that make up the component
    #[serde(default)]
    pub files: Vec<FileRef>,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    components: Vec<ComponentDescriptor>,
}

/// Ordered, immutable collection of component descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTable {
    components: Vec<ComponentDescriptor>,
}

impl ComponentTable {
    /// The table embedded in the library
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_TABLE)
    }

    /// Parse a table from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: TableDocument = serde_yaml_ng::from_str(content)
            .map_err(|source| RegistryError::TableParse { source })?;

        Self::from_descriptors(document.components)
    }

    /// Load a table from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Build a table from descriptors, rejecting duplicate names
    pub fn from_descriptors(components: Vec<ComponentDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.name.as_str()) {
                return Err(RegistryError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
        }

        debug!("Loaded component table with {} entries", components.len());
        Ok(Self { components })
    }

    /// Descriptors in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentDescriptor> {
        self.components.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'a> IntoIterator for &'a ComponentTable {
    type Item = &'a ComponentDescriptor;
    type IntoIter = std::slice::Iter<'a, ComponentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Why a component name cannot be used, if it cannot
///
/// Names become file names under the registry directory, so only lowercase
/// alphanumerics and inner hyphens are accepted.
pub fn component_name_problem(name: &str) -> Option<String> {
    if name.is_empty() {
        Some("Component name is required".to_string())
    } else if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c == '-' || c.is_ascii_digit())
    {
        Some(format!(
            "Component name '{name}' must be lowercase alphanumeric with hyphens"
        ))
    } else if name.starts_with('-') || name.ends_with('-') {
        Some(format!("Component name '{name}' cannot start or end with a hyphen"))
    } else {
        None
    }
}

/// Whether a source path stays under the package root when joined to it
pub fn is_package_relative(path: &str) -> bool {
    let path = Path::new(path);
    !path.has_root()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
