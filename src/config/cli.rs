//! Command line configuration source

use crate::cli::args::Args;
use crate::config::ConfigSource;
use crate::error::Result;
use crate::models::PartialSettings;
use std::path::PathBuf;

/// Configuration source backed by parsed command line arguments
pub struct CliConfig {
    args: Args,
}

impl CliConfig {
    pub fn from_args(args: &Args) -> Self {
        Self { args: args.clone() }
    }

    /// Explicit config file path given on the command line, if any
    pub fn config_path(&self) -> Option<PathBuf> {
        self.args.config.clone()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let mut partial = PartialSettings::default();

        if !args.addons_path.is_empty() {
            partial.addon_paths = Some(args.addons_path.clone());
        }
        if !args.exclude.is_empty() {
            partial.exclude_patterns = Some(args.exclude.clone());
        }
        partial.output_format = args.output;
        partial.output_file = args.output_file.clone();
        partial.markdown_file = args.output_markdown.clone();
        if args.no_colors {
            partial.use_colors = Some(false);
        }
        if args.quiet {
            partial.quiet = Some(true);
        }
        if args.verbose {
            partial.verbose = Some(true);
        }

        Ok(partial)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "command line"
    }

    fn priority(&self) -> u8 {
        100
    }
}
