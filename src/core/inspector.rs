//! Core inspection engine

use crate::error::{InspectError, Result};
use crate::models::chain::{BaseDefinitionRef, InspectionReport};
use crate::models::Settings;
use crate::parsers::DependencyResolver;
use chrono::Utc;
use std::path::PathBuf;

/// One-shot inspection engine.
///
/// Validates the configured addon paths on construction and resolves one
/// model per `inspect` call; parser caches persist across calls on the same
/// instance.
pub struct Inspector {
    settings: Settings,
    resolver: DependencyResolver,
}

impl Inspector {
    pub fn new(settings: Settings) -> Result<Self> {
        let mut addon_paths: Vec<PathBuf> = Vec::new();
        for path in &settings.addon_paths {
            if path.is_dir() {
                addon_paths.push(path.clone());
            } else {
                eprintln!(
                    "Warning: addon path {} does not exist, skipping",
                    path.display()
                );
            }
        }
        if addon_paths.is_empty() {
            return Err(InspectError::NoAddonPaths);
        }

        let mut exclude = Vec::with_capacity(settings.exclude_patterns.len());
        for pattern in &settings.exclude_patterns {
            exclude.push(
                glob::Pattern::new(pattern)
                    .map_err(|source| InspectError::GlobPattern { source })?,
            );
        }

        Ok(Self {
            resolver: DependencyResolver::new(addon_paths, exclude),
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolve the inheritance chain of a model and assemble the report
    pub fn inspect(
        &mut self,
        model: &str,
        context_module: Option<&str>,
    ) -> Result<InspectionReport> {
        if let Some(context) = context_module {
            if self.resolver.module_path(context).is_none() {
                return Err(InspectError::ModuleNotFound {
                    module: context.to_string(),
                });
            }
        }

        if self.settings.verbose {
            eprintln!("Resolving inheritance chain for {}", model);
        }

        let chain = self.resolver.build_inheritance_chain(model, context_module);
        if chain.is_empty() {
            return Err(InspectError::ModelNotFound {
                model: model.to_string(),
            });
        }

        let base_definition = self
            .resolver
            .find_base_definition(model)
            .as_ref()
            .map(BaseDefinitionRef::from);

        let total_fields = chain
            .iter()
            .map(|node| node.declaration.fields.len())
            .sum();
        let modules_involved = chain.len();

        Ok(InspectionReport {
            model: model.to_string(),
            context_module: context_module.map(str::to_string),
            base_definition,
            inheritance_chain: chain,
            total_fields,
            modules_involved,
            docs_to_read: Vec::new(),
            generated_at: Utc::now(),
        })
    }
}
