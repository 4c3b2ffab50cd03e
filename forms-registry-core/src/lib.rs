//! Forms registry builder library exports

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod validator;

pub use builder::{build_registry, BuildSummary, GeneratedItem, RegistryBuilder};
pub use descriptor::{ComponentDescriptor, ComponentTable, FileRef};
pub use error::{RegistryError, Result};
pub use manifest::{ItemType, RegistryItem, RegistryManifest};
pub use validator::{RegistryValidator, Severity, ValidationIssue, ValidationReport};
