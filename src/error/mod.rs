//! Error handling for modinspect
//!
//! Provides the error type, severity levels, result alias and context
//! utilities used throughout the application.

pub mod context;
pub mod types;


pub use context::ResultExt;
pub use types::{ErrorSeverity, InspectError, Result};
