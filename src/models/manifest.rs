//! Module manifest data structures

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Parsed `__manifest__.py` mapping.
///
/// Only strings, numbers, booleans, lists and nested mappings survive the
/// extraction; any other Python value becomes null.
pub type Manifest = serde_json::Map<String, Value>;

/// Derived metadata view over a module's manifest
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    /// Human-readable name (`name` key, defaulting to the directory name)
    pub name: String,
    /// Version string (`version` key, defaulting to "unknown")
    pub version: String,
    /// Direct dependencies, falsy entries and duplicates removed
    pub depends: Vec<String>,
    /// Module directory
    pub path: PathBuf,
}
