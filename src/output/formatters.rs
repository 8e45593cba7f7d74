//! Report rendering for the supported output formats

use crate::error::{InspectError, Result, ResultExt};
use crate::models::chain::InspectionReport;
use ansi_term::Colour::{Cyan, Green, Red, Yellow};
use ansi_term::Style;
use serde_json::json;
use std::fmt::Write as _;

/// Render a report as pretty-printed JSON
pub fn format_report_json(report: &InspectionReport) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(report)
        .map_err(|source| InspectError::JsonSerialize { source })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Render a failure envelope as pretty-printed JSON.
///
/// Always succeeds; the envelope shape is fixed.
pub fn format_error_json(message: &str) -> String {
    let envelope = json!({
        "error": message,
        "status": "failed",
    });
    let mut rendered =
        serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string());
    rendered.push('\n');
    rendered
}

/// Render a report as a Markdown document
pub fn format_report_markdown(report: &InspectionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Inheritance Chain: `{}`", report.model);
    out.push('\n');
    let _ = writeln!(out, "**Total fields:** {}", report.total_fields);
    let _ = writeln!(out, "**Modules involved:** {}", report.modules_involved);
    if let Some(context) = &report.context_module {
        let _ = writeln!(out, "**Context module:** `{}`", context);
    }
    out.push('\n');

    let _ = writeln!(out, "## Base Definition");
    out.push('\n');
    match &report.base_definition {
        Some(base) => {
            let _ = writeln!(out, "- Module: `{}`", base.module);
            let _ = writeln!(out, "- File: `{}`", base.file.display());
            let _ = writeln!(out, "- Line: {}", base.line);
        }
        None => {
            let _ = writeln!(out, "*No base definition found*");
        }
    }
    out.push('\n');

    let _ = writeln!(out, "## Inheritance Tree");
    out.push('\n');
    let _ = writeln!(out, "```");
    for (index, node) in report.inheritance_chain.iter().enumerate() {
        let decl = &node.declaration;
        let mut label = decl.module.clone();
        if decl.is_base {
            let _ = write!(label, " (BASE) - {} fields", decl.fields.len());
        } else {
            let _ = write!(label, " +{} fields", decl.fields.len());
        }
        if report.context_module.as_deref() == Some(decl.module.as_str()) {
            label.push_str(" [CURRENT]");
        }
        if index == 0 {
            let _ = writeln!(out, "{}", label);
        } else {
            let _ = writeln!(out, "{}└─> {}", "    ".repeat(index - 1), label);
        }
    }
    let _ = writeln!(out, "```");
    out.push('\n');

    let _ = writeln!(out, "## Module Details");
    out.push('\n');
    for node in &report.inheritance_chain {
        let decl = &node.declaration;
        let marker = if decl.is_base { " (BASE)" } else { "" };
        let context_marker = if report.context_module.as_deref() == Some(decl.module.as_str()) {
            " (current context)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "### {}. {}{}{}",
            node.order, decl.module, marker, context_marker
        );
        out.push('\n');
        let _ = writeln!(out, "- File: `{}`", decl.file.display());
        let _ = writeln!(out, "- Line: {}", decl.line);
        if !node.depends_on.is_empty() {
            let _ = writeln!(out, "- Depends on: {}", node.depends_on.join(", "));
        }
        out.push('\n');

        let heading = if decl.is_base {
            "Fields Defined"
        } else {
            "Fields Added"
        };
        let _ = writeln!(out, "**{}:**", heading);
        out.push('\n');
        if decl.fields.is_empty() {
            let _ = writeln!(out, "*No fields added in this module*");
        } else {
            for (name, info) in &decl.fields {
                let required = if info.required { " `[required]`" } else { "" };
                let _ = writeln!(out, "- `{}`: {}{}", name, info.field_type, required);
            }
        }
        out.push('\n');

        if !decl.methods.is_empty() {
            let _ = writeln!(out, "**Methods:**");
            out.push('\n');
            let parents = report.parent_methods(node.order);
            for (name, has_super) in &decl.methods {
                let mut annotations = String::new();
                if *has_super {
                    if let Some(module) = parents.get(name.as_str()) {
                        let _ = write!(annotations, " `[super from {}]`", module);
                    }
                }
                let _ = writeln!(out, "- `{}`{}", name, annotations);
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "## Summary");
    out.push('\n');
    let _ = writeln!(
        out,
        "`{}` is assembled from {} module(s) contributing {} field(s) in total.",
        report.model, report.modules_involved, report.total_fields
    );
    out.push('\n');

    if !report.docs_to_read.is_empty() {
        let _ = writeln!(out, "## Documentation");
        out.push('\n');
        for doc in &report.docs_to_read {
            let _ = writeln!(out, "- {}", doc);
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "*Generated at {}*",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out
}

/// Render a report as human-readable text, optionally colored
pub fn format_report_text(report: &InspectionReport, use_colors: bool) -> String {
    let paint = |style: Style, text: &str| -> String {
        if use_colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        paint(Style::new().bold(), "Model:"),
        paint(Cyan.bold(), &report.model)
    );
    if let Some(context) = &report.context_module {
        let _ = writeln!(out, "Context module: {}", context);
    }
    match &report.base_definition {
        Some(base) => {
            let _ = writeln!(
                out,
                "Base definition: {} ({}:{})",
                paint(Green.normal(), &base.module),
                base.file.display(),
                base.line
            );
        }
        None => {
            let _ = writeln!(out, "Base definition: {}", paint(Red.normal(), "not found"));
        }
    }
    out.push('\n');

    let _ = writeln!(out, "{}", paint(Style::new().bold(), "Inheritance chain:"));
    for node in &report.inheritance_chain {
        let decl = &node.declaration;
        let marker = if decl.is_base {
            paint(Green.normal(), " (base)")
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {}. {}{} - {} field(s), {} method(s)",
            node.order,
            paint(Yellow.normal(), &decl.module),
            marker,
            decl.fields.len(),
            decl.methods.len()
        );
        let _ = writeln!(out, "     {}:{}", decl.file.display(), decl.line);
        if !node.depends_on.is_empty() {
            let _ = writeln!(out, "     depends on: {}", node.depends_on.join(", "));
        }
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "{} module(s), {} field(s) in total",
        report.modules_involved, report.total_fields
    );
    if !report.docs_to_read.is_empty() {
        let _ = writeln!(out, "Docs to read: {}", report.docs_to_read.join(", "));
    }
    out
}

/// Render a report as CSV, one row per declared field
pub fn format_report_csv(report: &InspectionReport) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(["module", "order", "is_base", "field", "field_type", "required"])
        .map_err(|source| InspectError::Csv { source })?;

    for node in &report.inheritance_chain {
        let decl = &node.declaration;
        for (name, info) in &decl.fields {
            writer
                .write_record([
                    decl.module.as_str(),
                    &node.order.to_string(),
                    &decl.is_base.to_string(),
                    name,
                    &info.field_type,
                    &info.required.to_string(),
                ])
                .map_err(|source| InspectError::Csv { source })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| InspectError::Inspection {
            message: format!("CSV buffer error: {}", err),
        })?;
    String::from_utf8(bytes).with_context(|| "encoding CSV output")
}
