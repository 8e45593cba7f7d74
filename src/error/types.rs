//! Error types and definitions for modinspect

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for modinspect operations
#[derive(Debug, Error)]
pub enum InspectError {
    /// File read errors with path context
    #[error("Error reading {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model identity not found in any module
    #[error("Model '{model}' not found")]
    ModelNotFound { model: String },

    /// Requested context module has no directory under the addon roots
    #[error("Module '{module}' not found under the configured addon paths")]
    ModuleNotFound { module: String },

    /// None of the configured addon paths exist
    #[error("No addon directories found")]
    NoAddonPaths,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors without file context
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// JSON serialization errors
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// General inspection errors with context
    #[error("Inspection error: {message}")]
    Inspection { message: String },
}

/// Result type alias for modinspect operations
pub type Result<T> = std::result::Result<T, InspectError>;

impl InspectError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            InspectError::ConfigNotFound { .. }
            | InspectError::ConfigRead { .. }
            | InspectError::ConfigParse { .. }
            | InspectError::NoAddonPaths => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            InspectError::ModelNotFound { model } => {
                format!("Model '{}' was not found in any addon module", model)
            }
            InspectError::ModuleNotFound { module } => format!(
                "Module '{}' does not exist under the configured addon paths",
                module
            ),
            InspectError::NoAddonPaths => {
                "None of the configured addon directories exist".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Get a suggestion for resolving this error, if one is available
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            InspectError::ModelNotFound { .. } => Some(
                "Check the model name spelling and make sure the defining module \
                 is under one of the configured addon paths",
            ),
            InspectError::ModuleNotFound { .. } => {
                Some("Check the module name and the --addons-path arguments")
            }
            InspectError::NoAddonPaths => Some(
                "Pass at least one existing directory with --addons-path or set \
                 addon_paths in .modinspect.toml",
            ),
            InspectError::ConfigNotFound { .. } => Some(
                "Create a .modinspect.toml file with 'modinspect --init' or specify \
                 a config file with --config",
            ),
            InspectError::InvalidOutputFormat { .. } => {
                Some("Use one of: text, json, markdown, csv")
            }
            _ => None,
        }
    }
}
