//! Inheritance chain resolution.
//!
//! Combines module discovery, manifest dependencies and model declarations
//! into an ordered inheritance chain: contributors are discovered across the
//! candidate module set, a dependency graph restricted to the contributors is
//! built, and a deterministic topological order decides who extends whom.

use crate::models::chain::InheritanceNode;
use crate::models::declaration::ModelDeclaration;
use crate::parsers::manifest_parser::ManifestParser;
use crate::parsers::model_parser::ModelParser;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::PathBuf;

/// Resolver orchestrating the manifest and model parsers
pub struct DependencyResolver {
    manifest_parser: ManifestParser,
    model_parser: ModelParser,
}

impl DependencyResolver {
    pub fn new(addon_paths: Vec<PathBuf>, exclude: Vec<glob::Pattern>) -> Self {
        Self {
            manifest_parser: ManifestParser::new(addon_paths, exclude),
            model_parser: ModelParser::new(),
        }
    }

    pub fn module_path(&self, module: &str) -> Option<PathBuf> {
        self.manifest_parser.find_module_path(module)
    }

    /// Build the ordered inheritance chain for a model.
    ///
    /// Without a context module every discoverable module is a candidate;
    /// with one, the candidate set is the context module plus its transitive
    /// dependency closure. Returns an empty chain when no module contributes.
    pub fn build_inheritance_chain(
        &mut self,
        model: &str,
        context_module: Option<&str>,
    ) -> Vec<InheritanceNode> {
        let candidates = self.candidate_modules(context_module);
        let contributors = self.find_contributors(model, &candidates);
        if contributors.is_empty() {
            return Vec::new();
        }

        let graph = self.build_dependency_graph(&contributors);
        let mut ordered = topological_sort(&graph, &contributors);

        // The module declaring the base definition leads the chain
        // regardless of dependency ordering
        if let Some(base_pos) = ordered
            .iter()
            .position(|module| contributors[module].is_base)
        {
            let base = ordered.remove(base_pos);
            ordered.insert(0, base);
        }

        let mut chain = Vec::with_capacity(ordered.len());
        let in_chain: HashSet<&String> = ordered.iter().collect();
        for (index, module) in ordered.iter().enumerate() {
            let depends_on = graph
                .get(module)
                .map(|deps| {
                    deps.iter()
                        .filter(|dep| in_chain.contains(dep))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            chain.push(InheritanceNode {
                declaration: contributors[module].clone(),
                order: index + 1,
                depends_on,
            });
        }
        chain
    }

    /// Locate the defining declaration of a model across all discoverable
    /// modules, ignoring any context scoping
    pub fn find_base_definition(&mut self, model: &str) -> Option<ModelDeclaration> {
        for (module, path) in self.manifest_parser.list_all_modules() {
            let declarations = self
                .model_parser
                .find_models_in_module(&path, &module, Some(model));
            if let Some(base) = declarations
                .into_iter()
                .find(|decl| decl.is_base && decl.model_name.as_deref() == Some(model))
            {
                return Some(base);
            }
        }
        None
    }

    fn candidate_modules(&mut self, context_module: Option<&str>) -> Vec<(String, PathBuf)> {
        match context_module {
            None => self.manifest_parser.list_all_modules(),
            Some(context) => {
                let mut names = vec![context.to_string()];
                names.extend(self.manifest_parser.get_all_dependencies_recursive(context));
                names
                    .into_iter()
                    .filter_map(|name| {
                        self.manifest_parser
                            .find_module_path(&name)
                            .map(|path| (name, path))
                    })
                    .collect()
            }
        }
    }

    /// One contributing declaration per module, keyed by module name in
    /// discovery order. The first matching declaration in a module wins.
    fn find_contributors(
        &mut self,
        model: &str,
        candidates: &[(String, PathBuf)],
    ) -> IndexMap<String, ModelDeclaration> {
        let mut contributors = IndexMap::new();
        for (module, path) in candidates {
            if contributors.contains_key(module) {
                continue;
            }
            let declarations = self
                .model_parser
                .find_models_in_module(path, module, Some(model));
            if let Some(first) = declarations.into_iter().next() {
                contributors.insert(module.clone(), first);
            }
        }
        contributors
    }

    /// Adjacency restricted to the contributor set: an edge from a module to
    /// each of its direct manifest dependencies that also contributes
    fn build_dependency_graph(
        &mut self,
        contributors: &IndexMap<String, ModelDeclaration>,
    ) -> BTreeMap<String, Vec<String>> {
        let mut graph = BTreeMap::new();
        for module in contributors.keys() {
            let deps = match self.manifest_parser.find_module_path(module) {
                Some(path) => self
                    .manifest_parser
                    .get_dependencies(&path)
                    .into_iter()
                    .filter(|dep| contributors.contains_key(dep))
                    .collect(),
                None => Vec::new(),
            };
            graph.insert(module.clone(), deps);
        }
        graph
    }
}

/// Deterministic Kahn ordering over the restricted graph.
///
/// In-degree counts dependents, so the raw pass emits dependents before
/// dependencies with a lexicographic tie-break among ready modules; the
/// result is reversed to put dependencies first. Modules caught in a
/// dependency cycle are reported on stderr and appended after the sorted
/// portion in discovery order.
fn topological_sort(
    graph: &BTreeMap<String, Vec<String>>,
    contributors: &IndexMap<String, ModelDeclaration>,
) -> Vec<String> {
    let mut dependents_left: BTreeMap<&str, usize> =
        graph.keys().map(|module| (module.as_str(), 0)).collect();
    for deps in graph.values() {
        for dep in deps {
            if let Some(count) = dependents_left.get_mut(dep.as_str()) {
                *count += 1;
            }
        }
    }

    let mut ready: BTreeSet<&str> = dependents_left
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(module, _)| *module)
        .collect();
    let mut sorted = Vec::with_capacity(graph.len());

    while let Some(module) = ready.iter().next().copied() {
        ready.remove(module);
        sorted.push(module.to_string());
        for dep in graph.get(module).into_iter().flatten() {
            let count = dependents_left
                .get_mut(dep.as_str())
                .filter(|count| **count > 0);
            if let Some(count) = count {
                *count -= 1;
                if *count == 0 {
                    ready.insert(dep.as_str());
                }
            }
        }
    }

    sorted.reverse();

    if sorted.len() < graph.len() {
        // residue keeps contributor discovery order
        let residue: Vec<String> = {
            let placed: HashSet<&str> = sorted.iter().map(String::as_str).collect();
            let mut unresolved: Vec<&str> = graph
                .keys()
                .map(String::as_str)
                .filter(|module| !placed.contains(module))
                .collect();
            unresolved.sort_unstable();
            eprintln!(
                "Warning: dependency cycle among modules: {}",
                unresolved.join(", ")
            );
            contributors
                .keys()
                .filter(|module| !placed.contains(module.as_str()))
                .cloned()
                .collect()
        };
        sorted.extend(residue);
    }

    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_module(root: &Path, name: &str, depends: &[&str], model_source: Option<&str>) {
        let path = root.join(name);
        fs::create_dir_all(&path).unwrap();
        let deps = depends
            .iter()
            .map(|d| format!("'{}'", d))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            path.join("__manifest__.py"),
            format!("{{'name': '{}', 'depends': [{}]}}\n", name, deps),
        )
        .unwrap();
        if let Some(source) = model_source {
            let models = path.join("models");
            fs::create_dir_all(&models).unwrap();
            fs::write(models.join("models.py"), source).unwrap();
        }
    }

    fn base_source(model: &str) -> String {
        format!(
            "from odoo import fields, models\n\n\nclass M(models.Model):\n    _name = '{}'\n\n    name = fields.Char(required=True)\n",
            model
        )
    }

    fn inherit_source(model: &str, field: &str) -> String {
        format!(
            "from odoo import fields, models\n\n\nclass M(models.Model):\n    _inherit = '{}'\n\n    {} = fields.Char()\n",
            model, field
        )
    }

    fn resolver_for(root: &Path) -> DependencyResolver {
        DependencyResolver::new(vec![root.to_path_buf()], Vec::new())
    }

    #[test]
    fn chain_orders_base_then_extensions_by_dependency() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "b",
            &["a"],
            Some(&inherit_source("my.model", "extra_b")),
        );
        make_module(
            dir.path(),
            "c",
            &["b"],
            Some(&inherit_source("my.model", "extra_c")),
        );

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", None);

        let modules: Vec<&str> = chain.iter().map(|n| n.declaration.module.as_str()).collect();
        assert_eq!(modules, vec!["a", "b", "c"]);
        assert_eq!(chain[0].order, 1);
        assert!(chain[0].declaration.is_base);
        assert_eq!(chain[1].depends_on, vec!["a"]);
        assert_eq!(chain[2].depends_on, vec!["b"]);
    }

    #[test]
    fn independent_extensions_order_deterministically() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "base_mod", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "zeta",
            &["base_mod"],
            Some(&inherit_source("my.model", "z_field")),
        );
        make_module(
            dir.path(),
            "alpha",
            &["base_mod"],
            Some(&inherit_source("my.model", "a_field")),
        );

        let mut resolver = resolver_for(dir.path());
        // the raw pass pops ready modules in name order (alpha before zeta)
        // and the reversal flips them behind the base
        let expected = vec!["base_mod", "zeta", "alpha"];
        for _ in 0..3 {
            let chain = resolver.build_inheritance_chain("my.model", None);
            let modules: Vec<&str> =
                chain.iter().map(|n| n.declaration.module.as_str()).collect();
            assert_eq!(modules, expected);
        }
    }

    #[test]
    fn dependencies_on_modules_outside_chain_are_dropped() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "b",
            &["a", "unrelated", "missing_pkg"],
            Some(&inherit_source("my.model", "extra")),
        );
        make_module(dir.path(), "unrelated", &[], None);

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", None);
        assert_eq!(chain[1].declaration.module, "b");
        assert_eq!(chain[1].depends_on, vec!["a"]);
    }

    #[test]
    fn contributor_with_only_missing_dependencies_gets_empty_depends_on() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "b",
            &["missing_pkg"],
            Some(&inherit_source("my.model", "extra")),
        );

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", None);
        let b = chain
            .iter()
            .find(|n| n.declaration.module == "b")
            .unwrap();
        assert!(b.depends_on.is_empty());
    }

    #[test]
    fn cycle_residue_appended_after_base() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "p",
            &["a", "q"],
            Some(&inherit_source("my.model", "p_field")),
        );
        make_module(
            dir.path(),
            "q",
            &["a", "p"],
            Some(&inherit_source("my.model", "q_field")),
        );

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", None);
        let modules: Vec<&str> = chain.iter().map(|n| n.declaration.module.as_str()).collect();
        // the p/q cycle strands the whole component, so discovery order
        // applies and the base is forced to the front
        assert_eq!(modules, vec!["a", "p", "q"]);
        assert_eq!(chain.iter().map(|n| n.order).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn mutual_cycle_without_base_resolves_in_discovery_order() {
        let dir = TempDir::new().unwrap();
        make_module(
            dir.path(),
            "p",
            &["q"],
            Some(&inherit_source("y.model", "p_field")),
        );
        make_module(
            dir.path(),
            "q",
            &["p"],
            Some(&inherit_source("y.model", "q_field")),
        );

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("y.model", None);
        let modules: Vec<&str> = chain.iter().map(|n| n.declaration.module.as_str()).collect();
        assert_eq!(modules, vec!["p", "q"]);
        assert!(chain.iter().all(|n| !n.declaration.is_base));
        assert_eq!(chain.iter().map(|n| n.order).collect::<Vec<_>>(), vec![1, 2]);
        assert!(resolver.find_base_definition("y.model").is_none());
    }

    #[test]
    fn context_module_scopes_the_candidate_set() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "b",
            &["a"],
            Some(&inherit_source("my.model", "b_field")),
        );
        make_module(
            dir.path(),
            "c",
            &["a"],
            Some(&inherit_source("my.model", "c_field")),
        );

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", Some("b"));
        let modules: Vec<&str> = chain.iter().map(|n| n.declaration.module.as_str()).collect();
        // c is not in b's dependency closure
        assert_eq!(modules, vec!["a", "b"]);
    }

    #[test]
    fn first_declaration_per_module_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m");
        fs::create_dir_all(path.join("models")).unwrap();
        fs::write(path.join("__manifest__.py"), "{'depends': []}\n").unwrap();
        fs::write(
            path.join("models").join("a_first.py"),
            inherit_source("my.model", "first_field"),
        )
        .unwrap();
        fs::write(
            path.join("models").join("b_second.py"),
            inherit_source("my.model", "second_field"),
        )
        .unwrap();

        let mut resolver = resolver_for(dir.path());
        let chain = resolver.build_inheritance_chain("my.model", None);
        assert_eq!(chain.len(), 1);
        assert!(chain[0].declaration.fields.contains_key("first_field"));
    }

    #[test]
    fn empty_chain_when_model_unknown() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));

        let mut resolver = resolver_for(dir.path());
        assert!(resolver
            .build_inheritance_chain("missing.model", None)
            .is_empty());
    }

    #[test]
    fn find_base_definition_ignores_context() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", &[], Some(&base_source("my.model")));
        make_module(
            dir.path(),
            "b",
            &["a"],
            Some(&inherit_source("my.model", "extra")),
        );

        let mut resolver = resolver_for(dir.path());
        let base = resolver.find_base_definition("my.model").unwrap();
        assert_eq!(base.module, "a");
        assert!(base.is_base);
        assert!(resolver.find_base_definition("missing.model").is_none());
    }
}
