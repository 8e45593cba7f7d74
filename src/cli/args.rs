//! Command line argument definitions

use crate::models::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Inspect Odoo model inheritance chains without running Odoo
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modinspect",
    version,
    about = "Static inspector for Odoo model inheritance chains",
    after_help = "EXAMPLES:
    # Inspect a model across all modules under the current directory
    modinspect sale.order

    # Restrict the chain to one module and its dependency closure
    modinspect sale.order --context-module sale_custom

    # Search several addon roots and save a markdown report
    modinspect res.partner -a ./addons -a ./enterprise --output-markdown report.md

    # Machine-readable output to a file
    modinspect sale.order --output json --output-file chain.json

    # Create a default configuration file
    modinspect --init"
)]
pub struct Args {
    /// Model identity to inspect (e.g. sale.order)
    pub model: Option<String>,

    /// Scope the chain to this module and its dependency closure
    #[arg(long, value_name = "MODULE")]
    pub context_module: Option<String>,

    /// Addon root directory to search (repeatable)
    #[arg(short = 'a', long = "addons-path", value_name = "DIR")]
    pub addons_path: Vec<PathBuf>,

    /// Glob pattern for module directory names to skip (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Additionally write a markdown report to this file
    #[arg(long, value_name = "FILE")]
    pub output_markdown: Option<PathBuf>,

    /// Documentation reference to list in the report (repeatable)
    #[arg(long, value_name = "DOC")]
    pub docs: Vec<String>,

    /// Path to a configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Create a default .modinspect.toml in the current directory
    #[arg(long)]
    pub init: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_colors: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
