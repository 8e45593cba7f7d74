//! modinspect - static inspector for Odoo model inheritance chains
//!
//! Reconstructs how a model like `sale.order` is assembled across addon
//! modules by parsing Python sources and manifests, without importing or
//! executing any of the analyzed code. Modules contributing to a model are
//! discovered under the configured addon roots, ordered by their manifest
//! dependency graph and rendered as a report in text, JSON, Markdown or CSV.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

pub use crate::core::Inspector;
pub use error::{ErrorSeverity, InspectError, Result};
pub use models::{InspectionReport, OutputFormat, Settings};

/// Version of the modinspect crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the modinspect crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
