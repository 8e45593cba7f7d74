//! File and environment configuration sources

use crate::config::parser;
use crate::config::ConfigSource;
use crate::error::Result;
use crate::models::{OutputFormat, PartialSettings};
use std::path::{Path, PathBuf};

/// Configuration source backed by a TOML file
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        "configuration file"
    }

    fn priority(&self) -> u8 {
        50
    }
}

/// Configuration source backed by MODINSPECT_* environment variables
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut partial = PartialSettings::default();

        if let Ok(paths) = std::env::var("MODINSPECT_ADDONS_PATH") {
            let paths: Vec<PathBuf> = paths
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
            if !paths.is_empty() {
                partial.addon_paths = Some(paths);
            }
        }
        if let Ok(format) = std::env::var("MODINSPECT_OUTPUT_FORMAT") {
            partial.output_format = format.parse::<OutputFormat>().ok();
        }
        if let Ok(value) = std::env::var("MODINSPECT_NO_COLORS") {
            if value == "1" || value.eq_ignore_ascii_case("true") {
                partial.use_colors = Some(false);
            }
        }

        Ok(partial)
    }

    fn is_available(&self) -> bool {
        std::env::vars().any(|(key, _)| key.starts_with("MODINSPECT_"))
    }

    fn name(&self) -> &str {
        "environment"
    }

    fn priority(&self) -> u8 {
        75
    }
}
