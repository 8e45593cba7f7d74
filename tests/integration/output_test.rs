//! Rendered report checks against a resolved chain

use crate::common::{build_addon_tree, inspector_for};
use modinspect::output::{format_report_markdown, FileWriter, OutputWriter};
use tempfile::TempDir;

#[test]
fn markdown_report_for_the_chain() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let mut report = inspector
        .inspect("sale.order", Some("sale_margin"))
        .unwrap();
    report.docs_to_read = vec!["https://example.com/sale".to_string()];

    let rendered = format_report_markdown(&report);
    assert!(rendered.contains("# Inheritance Chain: `sale.order`"));
    assert!(rendered.contains("sale (BASE) - 3 fields"));
    assert!(rendered.contains("└─> sale_margin +1 fields [CURRENT]"));
    assert!(rendered.contains("### 2. sale_margin (current context)"));
    assert!(rendered.contains("- `margin`: Float"));
    assert!(rendered.contains("`[super from sale]`"));
    assert!(rendered.contains("- https://example.com/sale"));
}

#[test]
fn markdown_side_file_written_with_parents() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let report = inspector.inspect("sale.order", None).unwrap();

    let out = dir.path().join("reports").join("sale_order.md");
    let mut writer = FileWriter::new(out.clone());
    writer.write(&format_report_markdown(&report)).unwrap();

    let written = std::fs::read_to_string(out).unwrap();
    assert!(written.contains("# Inheritance Chain: `sale.order`"));
}
