//! Data models and structures for modinspect

pub mod chain;
pub mod config;
pub mod declaration;
pub mod manifest;

pub use chain::{BaseDefinitionRef, InheritanceNode, InspectionReport};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use declaration::{FieldInfo, ModelDeclaration};
pub use manifest::{Manifest, ModuleInfo};
