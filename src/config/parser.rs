//! Configuration file parsing

use crate::error::{InspectError, Result};
use crate::models::PartialSettings;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".modinspect.toml";

/// Parse TOML configuration content into partial settings
pub fn parse_config_content(content: &str) -> Result<PartialSettings> {
    toml::from_str(content).map_err(|source| InspectError::TomlParse { source })
}

/// Read and parse a configuration file
pub fn parse_config_file(path: &Path) -> Result<PartialSettings> {
    let content = fs::read_to_string(path).map_err(|source| InspectError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| InspectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the default configuration file if one exists in the working
/// directory
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    parse_config_file(&path).map(Some)
}

/// Write a commented default configuration file at the given path
pub fn create_default_config(path: &Path) -> Result<()> {
    let template = r#"# modinspect configuration

# Addon root directories searched for modules, in priority order
addon_paths = ["."]

# Glob patterns for module directory names to skip
exclude_patterns = [".*", "__pycache__", "node_modules"]

# Output format: "text", "json", "markdown" or "csv"
output_format = "json"

# Write output to a file instead of stdout
# output_file = "report.json"

# Additionally write a markdown report to this file
# markdown_file = "report.md"

# Colored text output
use_colors = true
"#;
    fs::write(path, template).map_err(|source| InspectError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
