//! Settings validation

use crate::error::{InspectError, Result};
use crate::models::Settings;

/// Validates assembled settings before they reach the inspector
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.addon_paths.is_empty() {
            return Err(InspectError::Config {
                message: "at least one addon path is required".to_string(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .map_err(|source| InspectError::GlobPattern { source })?;
        }

        if let Some(output_file) = &settings.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(InspectError::Config {
                        message: format!(
                            "output directory {} does not exist",
                            parent.display()
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
