//! Registry builder error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the component table or building the registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// One or more descriptors reference files that are not on disk
    #[error("{count} source file(s) are missing. Please check the file paths.\n\nNo registry files were written.")]
    MissingSourceFiles { count: usize },

    /// Validation found blocking issues other than missing files
    #[error("Registry validation failed with {errors} error(s) and {warnings} warning(s).\n\nNo registry files were written.")]
    ValidationFailed { errors: usize, warnings: usize },

    /// The registry output directory could not be created
    #[error("Failed to create registry directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be written
    #[error("Failed to write manifest to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor table file could not be read
    #[error("Failed to read component table from {path}")]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor table is not valid YAML for the expected shape
    #[error("Failed to parse component table")]
    TableParse {
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Two descriptors share a name
    #[error("Duplicate component '{name}' in component table. Component names must be unique.")]
    DuplicateComponent { name: String },

    /// A constructed registry item failed its shape check
    #[error("Invalid registry item '{name}': {reason}")]
    InvalidItem { name: String, reason: String },

    /// JSON serialization failed
    #[error("Failed to serialize manifest")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
