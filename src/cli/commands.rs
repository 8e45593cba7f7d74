//! Command dispatch

use crate::cli::args::Args;
use crate::config::{self, parser};
use crate::core::Inspector;
use crate::error::{InspectError, Result};
use crate::models::OutputFormat;
use crate::output::{create_formatter, create_writer, format_report_markdown, FileWriter, OutputWriter};
use std::path::Path;

/// Resolved invocation
pub enum Command {
    /// Inspect a model and render the report
    Inspect(Args),
    /// Create a default configuration file
    Init,
}

impl Command {
    pub fn from_args(args: Args) -> Self {
        if args.init {
            Command::Init
        } else {
            Command::Inspect(args)
        }
    }

    pub fn execute(self) -> Result<()> {
        match self {
            Command::Init => run_init(),
            Command::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_init() -> Result<()> {
    let path = Path::new(parser::DEFAULT_CONFIG_FILE);
    if path.exists() {
        return Err(InspectError::Config {
            message: format!("{} already exists", path.display()),
        });
    }
    parser::create_default_config(path)?;
    eprintln!("Created {}", path.display());
    Ok(())
}

fn run_inspect(args: Args) -> Result<()> {
    let model = args.model.clone().ok_or_else(|| InspectError::Config {
        message: "a model name is required (e.g. modinspect sale.order)".to_string(),
    })?;

    let settings = config::load_config(&args)?;

    if !settings.quiet {
        eprintln!("Inspecting model: {}", model);
        if let Some(context) = &args.context_module {
            eprintln!("Context module: {}", context);
        }
        if settings.verbose {
            for path in &settings.addon_paths {
                eprintln!("Addon path: {}", path.display());
            }
        }
    }

    let mut inspector = Inspector::new(settings.clone())?;
    let mut report = inspector.inspect(&model, args.context_module.as_deref())?;
    report.docs_to_read = args.docs.clone();

    // colors only make sense on a terminal
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors);
    let rendered = formatter.format(&report)?;

    let mut writer = create_writer(settings.output_file.as_ref());
    writer.write(&rendered)?;

    if let Some(path) = &settings.markdown_file {
        if settings.output_format != OutputFormat::Markdown
            || settings.output_file.as_ref() != Some(path)
        {
            let markdown = format_report_markdown(&report);
            FileWriter::new(path.clone()).write(&markdown)?;
            if !settings.quiet {
                eprintln!("Markdown saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
