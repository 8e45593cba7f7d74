//! End-to-end chain resolution over a realistic addon tree

use crate::common::{build_addon_tree, inspector_for};
use modinspect::output::format_report_json;
use modinspect::InspectError;
use tempfile::TempDir;

#[test]
fn full_chain_as_json() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let report = inspector.inspect("sale.order", None).unwrap();
    let rendered = format_report_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["model"], "sale.order");
    assert_eq!(value["modules_involved"], 3);
    assert_eq!(value["total_fields"], 5);
    assert_eq!(value["context_module"], serde_json::Value::Null);
    assert_eq!(value["base_definition"]["module"], "sale");

    let chain = value["inheritance_chain"].as_array().unwrap();
    let modules: Vec<&str> = chain
        .iter()
        .map(|node| node["module"].as_str().unwrap())
        .collect();
    // base first; the reversed dependents-first pass places the independent
    // extensions behind it in reverse name order
    assert_eq!(modules, vec!["sale", "sale_stock", "sale_margin"]);
    assert_eq!(chain[0]["is_base"], true);
    assert_eq!(chain[1]["depends_on"], serde_json::json!(["sale"]));
    assert_eq!(chain[2]["depends_on"], serde_json::json!(["sale"]));
    assert_eq!(chain[2]["methods"]["action_confirm"], true);
    assert_eq!(chain[2]["methods"]["_compute_margin"], false);
    assert_eq!(chain[2]["order"], 3);
}

#[test]
fn context_module_narrows_the_chain() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let report = inspector
        .inspect("sale.order", Some("sale_margin"))
        .unwrap();

    let modules: Vec<&str> = report
        .inheritance_chain
        .iter()
        .map(|node| node.declaration.module.as_str())
        .collect();
    assert_eq!(modules, vec!["sale", "sale_margin"]);
    assert_eq!(report.context_module.as_deref(), Some("sale_margin"));
    // the global base scan is unaffected by the context
    assert_eq!(report.base_definition.as_ref().unwrap().module, "sale");
}

#[test]
fn unknown_model_fails_with_model_not_found() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let err = inspector.inspect("crm.lead", None).unwrap_err();
    assert!(matches!(err, InspectError::ModelNotFound { .. }));
}

#[test]
fn unrelated_models_do_not_leak_into_the_chain() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let report = inspector.inspect("website.page", None).unwrap();
    assert_eq!(report.modules_involved, 1);
    assert_eq!(report.inheritance_chain[0].declaration.module, "website");
}

#[test]
fn repeated_queries_reuse_parser_caches() {
    let dir = TempDir::new().unwrap();
    build_addon_tree(dir.path());

    let mut inspector = inspector_for(dir.path());
    let first = inspector.inspect("sale.order", None).unwrap();
    let second = inspector.inspect("sale.order", None).unwrap();

    let order = |report: &modinspect::InspectionReport| -> Vec<String> {
        report
            .inheritance_chain
            .iter()
            .map(|node| node.declaration.module.clone())
            .collect()
    };
    assert_eq!(order(&first), order(&second));
}
