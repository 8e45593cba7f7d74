//! Model declaration data extracted from Python source

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Field type names recognized inside a field constructor call.
///
/// The type tag of a field is the first entry found as a substring of the
/// resolved call name, in this order.
pub const FIELD_TYPES: [&str; 17] = [
    "Char",
    "Text",
    "Html",
    "Integer",
    "Float",
    "Monetary",
    "Boolean",
    "Date",
    "Datetime",
    "Binary",
    "Selection",
    "Many2one",
    "One2many",
    "Many2many",
    "Reference",
    "Json",
    "Properties",
];

/// Base classes that mark a Python class as an Odoo model definition
pub const MODEL_BASE_CLASSES: [&str; 3] =
    ["models.Model", "models.TransientModel", "models.AbstractModel"];

/// A single field declared on a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Field type tag (e.g. "Char", "Many2one")
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field carries a literal `required=True`
    pub required: bool,
}

/// One model definition found in one Python file.
///
/// A declaration is valid only if it carries `_name` (a base definition) or
/// a non-empty `_inherit` list (an extension). For extensions without `_name`,
/// `model_name` is the first inherited identity and `is_base` stays false.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDeclaration {
    /// Owning addon module name
    pub module: String,
    /// Source file the class was found in
    pub file: PathBuf,
    /// 1-based line number of the class definition
    pub line: usize,
    /// Resolved model identity
    pub model_name: Option<String>,
    /// Model identities this definition extends
    pub inherits: Vec<String>,
    /// True iff `_name` was declared as a string literal
    pub is_base: bool,
    /// Declared fields, keyed by field name
    pub fields: BTreeMap<String, FieldInfo>,
    /// Declared methods, keyed by name; the value records whether the
    /// method body contains a `super` call
    pub methods: BTreeMap<String, bool>,
}

impl ModelDeclaration {
    pub fn new(module: &str, file: &Path, line: usize) -> Self {
        Self {
            module: module.to_string(),
            file: file.to_path_buf(),
            line,
            model_name: None,
            inherits: Vec::new(),
            is_base: false,
            fields: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Whether this declaration defines or extends the given model identity
    pub fn matches(&self, model: &str) -> bool {
        self.model_name.as_deref() == Some(model) || self.inherits.iter().any(|i| i == model)
    }
}
