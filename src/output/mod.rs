//! Output formatting and writing

pub mod formatters;
pub mod writers;


use crate::error::Result;
use crate::models::chain::InspectionReport;
use crate::models::OutputFormat;

pub use formatters::{format_error_json, format_report_json, format_report_markdown};
pub use writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

/// Renderer for one output format
pub trait Formatter {
    fn format(&self, report: &InspectionReport) -> Result<String>;
}

pub struct TextFormatter {
    pub use_colors: bool,
}

impl Formatter for TextFormatter {
    fn format(&self, report: &InspectionReport) -> Result<String> {
        Ok(formatters::format_report_text(report, self.use_colors))
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &InspectionReport) -> Result<String> {
        formatters::format_report_json(report)
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format(&self, report: &InspectionReport) -> Result<String> {
        Ok(formatters::format_report_markdown(report))
    }
}

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &InspectionReport) -> Result<String> {
        formatters::format_report_csv(report)
    }
}

/// Create the formatter for an output format.
///
/// Colors apply to text output only and are forced off when the output goes
/// to a file.
pub fn create_formatter(format: OutputFormat, use_colors: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter { use_colors }),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
