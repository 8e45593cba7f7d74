//! Python source and manifest parsing

pub mod dependency_resolver;
pub mod manifest_parser;
pub mod model_parser;

pub use dependency_resolver::DependencyResolver;
pub use manifest_parser::{ManifestParser, MANIFEST_FILE};
pub use model_parser::ModelParser;
