//! Configuration-related data structures

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for modinspect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Addon root directories searched for modules, in priority order
    pub addon_paths: Vec<PathBuf>,

    /// Glob patterns for module directory names to skip during discovery
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json, markdown, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Optional side output: write a Markdown report to this path in
    /// addition to the primary output
    pub markdown_file: Option<PathBuf>,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            addon_paths: vec![PathBuf::from(".")],
            exclude_patterns: vec![
                ".*".to_string(),
                "__pycache__".to_string(),
                "node_modules".to_string(),
            ],
            output_format: OutputFormat::Json,
            output_file: None,
            markdown_file: None,
            use_colors: true,
            quiet: false,
            verbose: false,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Markdown report
    Markdown,
    /// CSV output for spreadsheet analysis (one row per field)
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(crate::error::InspectError::InvalidOutputFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialSettings {
    pub addon_paths: Option<Vec<PathBuf>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub markdown_file: Option<PathBuf>,
    pub use_colors: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one.
    /// Fields from `other` take precedence over existing fields.
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.addon_paths.is_some() {
            self.addon_paths = other.addon_paths;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.markdown_file.is_some() {
            self.markdown_file = other.markdown_file;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
    }

    /// Convert partial settings to full settings.
    /// Uses defaults for any fields that are None.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(addon_paths) = &self.addon_paths {
            settings.addon_paths = addon_paths.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(markdown_file) = &self.markdown_file {
            settings.markdown_file = Some(markdown_file.clone());
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }

        settings
    }
}
