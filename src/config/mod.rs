//! Configuration loading and merging.
//!
//! Settings are assembled from layered sources in priority order: built-in
//! defaults, then the configuration file, then environment variables, then
//! command line arguments. Later layers override earlier ones field by field.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;


use crate::cli::args::Args;
use crate::error::{InspectError, Result};
use crate::models::{PartialSettings, Settings};
use std::path::Path;

pub use cli::CliConfig;
pub use file::{EnvConfig, FileConfig};
pub use settings::SettingsValidator;

/// A source of partial configuration
pub trait ConfigSource {
    /// Load partial settings from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Whether this source has anything to contribute
    fn is_available(&self) -> bool;

    /// Human-readable source name for diagnostics
    fn name(&self) -> &str;

    /// Merge priority; higher priority sources override lower ones
    fn priority(&self) -> u8;
}

/// Builder assembling settings from layered sources
#[derive(Default)]
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial settings layer; its set fields override earlier ones
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Merge a source, propagating its load error
    pub fn load_from(self, source: &dyn ConfigSource) -> Result<Self> {
        let partial = source.load()?;
        Ok(self.merge(partial))
    }

    /// Merge a source if it is available, warning on load failure instead
    /// of propagating it
    pub fn try_load_from(self, source: &dyn ConfigSource) -> Self {
        if !source.is_available() {
            return self;
        }
        match source.load() {
            Ok(partial) => self.merge(partial),
            Err(err) => {
                eprintln!("Warning: cannot load {}: {}", source.name(), err);
                self
            }
        }
    }

    /// Merge an explicitly requested configuration file; a missing file is
    /// an error here, unlike the default lookup
    pub fn add_config_file(self, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(InspectError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        self.load_from(&FileConfig::new(path))
    }

    /// Merge the default configuration file if one exists
    pub fn try_add_default_config_file(self) -> Result<Self> {
        match parser::find_default_config()? {
            Some(partial) => Ok(self.merge(partial)),
            None => Ok(self),
        }
    }

    /// Finalize into validated settings
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

/// Assemble settings for a command line invocation.
///
/// An explicit `--config` file must exist; otherwise `.modinspect.toml` in
/// the working directory is used when present.
pub fn load_config(args: &Args) -> Result<Settings> {
    let cli = CliConfig::from_args(args);

    let builder = match cli.config_path() {
        Some(path) => ConfigBuilder::new().add_config_file(&path)?,
        None => ConfigBuilder::new().try_add_default_config_file()?,
    };

    builder
        .try_load_from(&EnvConfig)
        .load_from(&cli)?
        .build()
}
