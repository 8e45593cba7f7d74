//! Resolved inheritance chain structures

use super::declaration::ModelDeclaration;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One module's contribution to a resolved inheritance chain
#[derive(Debug, Clone)]
pub struct InheritanceNode {
    /// The contributing declaration (at most one per module per query)
    pub declaration: ModelDeclaration,
    /// 1-based position in the chain (1 = base)
    pub order: usize,
    /// Declared module dependencies filtered to modules present in the chain
    pub depends_on: Vec<String>,
}

impl Serialize for InheritanceNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let decl = &self.declaration;
        let mut state = serializer.serialize_struct("InheritanceNode", 12)?;
        state.serialize_field("module", &decl.module)?;
        state.serialize_field("file", &decl.file)?;
        state.serialize_field("line", &decl.line)?;
        state.serialize_field("model_name", &decl.model_name)?;
        state.serialize_field("inherits", &decl.inherits)?;
        state.serialize_field("is_base", &decl.is_base)?;
        state.serialize_field("fields", &decl.fields)?;
        state.serialize_field("fields_count", &decl.fields.len())?;
        state.serialize_field("methods", &decl.methods)?;
        state.serialize_field("methods_count", &decl.methods.len())?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("depends_on", &self.depends_on)?;
        state.end()
    }
}

/// Location of the base definition of a model (global scan, not scoped to
/// the chain's candidate set)
#[derive(Debug, Clone, Serialize)]
pub struct BaseDefinitionRef {
    pub module: String,
    pub file: PathBuf,
    pub line: usize,
}

impl From<&ModelDeclaration> for BaseDefinitionRef {
    fn from(decl: &ModelDeclaration) -> Self {
        Self {
            module: decl.module.clone(),
            file: decl.file.clone(),
            line: decl.line,
        }
    }
}

/// Complete result of one inspection query.
///
/// `base_definition` comes from a global scan of all discoverable modules,
/// while the chain's position-1 node reflects base detection among the
/// contributors only. The two can disagree when a context module hides the
/// global base; the report carries both without reconciling them.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub model: String,
    pub context_module: Option<String>,
    pub base_definition: Option<BaseDefinitionRef>,
    pub inheritance_chain: Vec<InheritanceNode>,
    pub total_fields: usize,
    pub modules_involved: usize,
    pub docs_to_read: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl InspectionReport {
    /// Modules that define a given method earlier in the chain than
    /// `before_order`, keyed by method name. The closest earlier occurrence
    /// wins, so a method is attributed to the nearest ancestor defining it.
    pub fn parent_methods(&self, before_order: usize) -> BTreeMap<&str, &str> {
        let mut parents = BTreeMap::new();
        for node in self
            .inheritance_chain
            .iter()
            .filter(|n| n.order < before_order)
            .rev()
        {
            for method in node.declaration.methods.keys() {
                parents
                    .entry(method.as_str())
                    .or_insert(node.declaration.module.as_str());
            }
        }
        parents
    }
}
