//! Registry manifest types
//!
//! `RegistryItem` is the per-component manifest (`registry/<name>.json`),
//! `RegistryManifest` the package-level one (`registry.json`). Both are
//! serialized as JSON with two-space indentation and no trailing newline.

use serde::{Deserialize, Serialize};

use crate::descriptor::{component_name_problem, ComponentDescriptor, FileRef};
use crate::error::{RegistryError, Result};

/// Schema the component installation tool validates `registry.json` against
pub const REGISTRY_SCHEMA_URL: &str = "https://ui.shadcn.com/schema.json";

/// Kind of registry item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "registry:ui")]
    Ui,
}

/// Manifest for a single component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub description: String,

    pub dependencies: Vec<String>,

    pub registry_dependencies: Vec<String>,

    /// File references, copied verbatim from the descriptor
    pub files: Vec<FileRef>,
}

impl RegistryItem {
    /// Build the manifest entry for a descriptor
    pub fn from_descriptor(descriptor: &ComponentDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            item_type: ItemType::Ui,
            description: descriptor.description.clone(),
            dependencies: descriptor.dependencies.clone(),
            registry_dependencies: descriptor.registry_dependencies.clone(),
            files: descriptor
                .files
                .iter()
                .map(|file| FileRef {
                    name: file.name.clone(),
                    path: file.path.clone(),
                })
                .collect(),
        }
    }

    /// Check the item shape before it is written
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name is required"));
        }
        if let Some(problem) = component_name_problem(&self.name) {
            return Err(self.invalid(problem));
        }

        for file in &self.files {
            if file.name.trim().is_empty() {
                return Err(self.invalid(format!("file '{}' has an empty name", file.path)));
            }
            if file.path.trim().is_empty() {
                return Err(self.invalid(format!("file '{}' has an empty path", file.name)));
            }
        }

        Ok(())
    }

    /// Output file name (`<name>.json`)
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name)
    }

    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(self)
    }

    fn invalid(&self, reason: impl Into<String>) -> RegistryError {
        RegistryError::InvalidItem {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Tailwind settings consumers should use with the components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    pub config: String,
    pub css: String,
    pub base_color: String,
    pub css_variables: bool,
}

/// Path aliases of the consuming project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    pub components: String,
    pub utils: String,
}

/// The package-level manifest (`registry.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryManifest {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub style: String,
    pub tailwind: TailwindConfig,
    pub aliases: Aliases,
}

impl Default for RegistryManifest {
    fn default() -> Self {
        Self {
            schema: REGISTRY_SCHEMA_URL.to_string(),
            name: "medusa-forms".to_string(),
            description: "Controlled form fields for Medusa Admin and Medusa UI".to_string(),
            url: "https://raw.githubusercontent.com/lambda-curry/medusa-forms/main/packages/medusa-forms"
                .to_string(),
            style: "default".to_string(),
            tailwind: TailwindConfig {
                config: "tailwind.config.js".to_string(),
                css: "src/styles/globals.css".to_string(),
                base_color: "slate".to_string(),
                css_variables: true,
            },
            aliases: Aliases {
                components: "src/components".to_string(),
                utils: "src/lib/utils".to_string(),
            },
        }
    }
}

impl RegistryManifest {
    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(self)
    }
}

// serde_json's pretty printer indents with two spaces
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| RegistryError::Serialize { source })
}
