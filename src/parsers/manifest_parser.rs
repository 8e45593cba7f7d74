//! Manifest parsing and module discovery.
//!
//! A module is a directory under one of the addon roots containing a
//! `__manifest__.py` file. The manifest is a Python file whose first
//! top-level dict literal carries the module metadata; it is parsed with the
//! same grammar as the model files and converted to a JSON mapping, never
//! evaluated.

use crate::error::{InspectError, Result};
use crate::models::manifest::{Manifest, ModuleInfo};
use rustpython_parser::{ast, Parse};
use serde_json::{Number, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "__manifest__.py";

/// Parser and locator for module manifests.
///
/// Manifests are memoized per module directory for the life of the instance.
pub struct ManifestParser {
    addon_paths: Vec<PathBuf>,
    exclude: Vec<glob::Pattern>,
    cache: HashMap<PathBuf, Manifest>,
}

impl ManifestParser {
    pub fn new(addon_paths: Vec<PathBuf>, exclude: Vec<glob::Pattern>) -> Self {
        Self {
            addon_paths,
            exclude,
            cache: HashMap::new(),
        }
    }

    /// Locate a module directory by name.
    ///
    /// Addon roots are searched in configuration order and the first match
    /// wins; a directory only counts if it carries a manifest file.
    pub fn find_module_path(&self, module: &str) -> Option<PathBuf> {
        for root in &self.addon_paths {
            let candidate = root.join(module);
            if candidate.join(MANIFEST_FILE).is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Parse a module's manifest into a JSON mapping.
    ///
    /// Missing or malformed manifests yield an empty mapping; parse failures
    /// warn on stderr.
    pub fn parse_manifest(&mut self, module_path: &Path) -> Manifest {
        if let Some(cached) = self.cache.get(module_path) {
            return cached.clone();
        }

        let manifest_path = module_path.join(MANIFEST_FILE);
        let manifest = match extract_manifest(&manifest_path) {
            Ok(manifest) => manifest,
            Err(err) => {
                eprintln!("Warning: {}", err);
                Manifest::new()
            }
        };

        self.cache.insert(module_path.to_path_buf(), manifest.clone());
        manifest
    }

    /// Direct dependencies of a module, in declared order, with falsy
    /// entries and duplicates removed
    pub fn get_dependencies(&mut self, module_path: &Path) -> Vec<String> {
        let manifest = self.parse_manifest(module_path);
        depends_from(&manifest)
    }

    /// Transitive dependency closure of a module, in depth-first first-seen
    /// order. Cycles and missing modules terminate their branch silently.
    pub fn get_all_dependencies_recursive(&mut self, module: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut ordered = Vec::new();
        self.collect_dependencies(module, &mut visited, &mut ordered);
        ordered
    }

    fn collect_dependencies(
        &mut self,
        module: &str,
        visited: &mut HashSet<String>,
        ordered: &mut Vec<String>,
    ) {
        if !visited.insert(module.to_string()) {
            return;
        }
        let Some(path) = self.find_module_path(module) else {
            return;
        };
        for dep in self.get_dependencies(&path) {
            if !visited.contains(&dep) {
                ordered.push(dep.clone());
                self.collect_dependencies(&dep, visited, ordered);
            }
        }
    }

    /// Metadata view of a module's manifest with defaults filled in
    pub fn get_module_info(&mut self, module: &str, module_path: &Path) -> ModuleInfo {
        let manifest = self.parse_manifest(module_path);
        let name = manifest
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(module)
            .to_string();
        let version = manifest
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        ModuleInfo {
            name,
            version,
            depends: depends_from(&manifest),
            path: module_path.to_path_buf(),
        }
    }

    /// Discover every module under the addon roots.
    ///
    /// Each root's entries are visited in sorted name order; directories
    /// without a manifest or matching an exclude pattern are skipped, and a
    /// name already seen under an earlier root is not repeated.
    pub fn list_all_modules(&self) -> Vec<(String, PathBuf)> {
        let mut seen = HashSet::new();
        let mut modules = Vec::new();

        for root in &self.addon_paths {
            let entries = match fs::read_dir(root) {
                Ok(entries) => entries,
                Err(err) => {
                    eprintln!("Warning: cannot read {}: {}", root.display(), err);
                    continue;
                }
            };

            let mut names: Vec<String> = entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_dir())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();

            for name in names {
                if self.exclude.iter().any(|pattern| pattern.matches(&name)) {
                    continue;
                }
                let path = root.join(&name);
                if !path.join(MANIFEST_FILE).is_file() {
                    continue;
                }
                if seen.insert(name.clone()) {
                    modules.push((name, path));
                }
            }
        }

        modules
    }
}

fn depends_from(manifest: &Manifest) -> Vec<String> {
    let mut seen = HashSet::new();
    manifest
        .get("depends")
        .and_then(Value::as_array)
        .map(|deps| {
            deps.iter()
                .filter_map(Value::as_str)
                .filter(|dep| !dep.is_empty())
                .filter(|dep| seen.insert(dep.to_string()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn extract_manifest(path: &Path) -> Result<Manifest> {
    let source = fs::read_to_string(path).map_err(|source| InspectError::IoRead {
        path: path.to_path_buf(),
        source,
    })?;
    let suite = ast::Suite::parse(&source, &path.to_string_lossy()).map_err(|err| {
        InspectError::Inspection {
            message: format!("parsing {}: {}", path.display(), err),
        }
    })?;

    // The manifest is the first top-level dict literal, whether bare or
    // assigned to a name
    for stmt in &suite {
        let value = match stmt {
            ast::Stmt::Expr(stmt) => &stmt.value,
            ast::Stmt::Assign(stmt) => &stmt.value,
            _ => continue,
        };
        if let ast::Expr::Dict(dict) = value.as_ref() {
            return Ok(extract_dict(dict));
        }
    }

    Err(InspectError::Inspection {
        message: format!("{}: no dict literal found", path.display()),
    })
}

fn extract_dict(dict: &ast::ExprDict) -> Manifest {
    let mut map = Manifest::new();
    for (key, value) in dict.keys.iter().zip(&dict.values) {
        // Only string keys survive; ** expansions have no key
        let Some(key) = key else { continue };
        let ast::Expr::Constant(constant) = key else {
            continue;
        };
        let ast::Constant::Str(key) = &constant.value else {
            continue;
        };
        map.insert(key.clone(), extract_value(value));
    }
    map
}

fn extract_value(expr: &ast::Expr) -> Value {
    match expr {
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Str(value) => Value::String(value.clone()),
            ast::Constant::Bool(value) => Value::Bool(*value),
            ast::Constant::Int(value) => value
                .to_string()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
            ast::Constant::Float(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        ast::Expr::List(list) => Value::Array(list.elts.iter().map(extract_value).collect()),
        ast::Expr::Dict(dict) => Value::Object(extract_dict(dict)),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_module(root: &Path, name: &str, manifest: &str) -> PathBuf {
        let path = root.join(name);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(MANIFEST_FILE), manifest).unwrap();
        path
    }

    fn parser_for(root: &Path) -> ManifestParser {
        ManifestParser::new(vec![root.to_path_buf()], Vec::new())
    }

    #[test]
    fn parses_manifest_values() {
        let dir = TempDir::new().unwrap();
        let path = make_module(
            dir.path(),
            "sale",
            r#"{
    'name': 'Sales',
    'version': '17.0.1.2',
    'depends': ['base', 'mail'],
    'installable': True,
    'sequence': 15,
    'price': 9.99,
    'external_dependencies': {'python': ['dateutil']},
    'post_init_hook': some_function,
}"#,
        );

        let mut parser = parser_for(dir.path());
        let manifest = parser.parse_manifest(&path);

        assert_eq!(manifest["name"], "Sales");
        assert_eq!(manifest["version"], "17.0.1.2");
        assert_eq!(manifest["installable"], true);
        assert_eq!(manifest["sequence"], 15);
        assert_eq!(manifest["price"], 9.99);
        assert_eq!(
            manifest["external_dependencies"]["python"],
            serde_json::json!(["dateutil"])
        );
        // non-literal values degrade to null
        assert_eq!(manifest["post_init_hook"], Value::Null);
    }

    #[test]
    fn manifest_assigned_to_name_is_found() {
        let dir = TempDir::new().unwrap();
        let path = make_module(
            dir.path(),
            "assigned",
            "manifest = {'name': 'Assigned', 'depends': []}\n",
        );

        let mut parser = parser_for(dir.path());
        assert_eq!(parser.parse_manifest(&path)["name"], "Assigned");
    }

    #[test]
    fn broken_manifest_yields_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let path = make_module(dir.path(), "broken", "{'name': 'Broken'\n");

        let mut parser = parser_for(dir.path());
        assert!(parser.parse_manifest(&path).is_empty());
    }

    #[test]
    fn dependencies_drop_falsy_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = make_module(
            dir.path(),
            "m",
            "{'depends': ['base', '', 'mail', 'base', None]}\n",
        );

        let mut parser = parser_for(dir.path());
        assert_eq!(parser.get_dependencies(&path), vec!["base", "mail"]);
    }

    #[test]
    fn first_root_wins_for_module_lookup() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        make_module(dir_a.path(), "sale", "{'name': 'A'}\n");
        make_module(dir_b.path(), "sale", "{'name': 'B'}\n");

        let parser = ManifestParser::new(
            vec![dir_a.path().to_path_buf(), dir_b.path().to_path_buf()],
            Vec::new(),
        );
        assert_eq!(
            parser.find_module_path("sale"),
            Some(dir_a.path().join("sale"))
        );
    }

    #[test]
    fn directory_without_manifest_is_not_a_module() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("not_a_module")).unwrap();

        let parser = parser_for(dir.path());
        assert_eq!(parser.find_module_path("not_a_module"), None);
    }

    #[test]
    fn recursive_dependencies_follow_first_seen_order_and_survive_cycles() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", "{'depends': ['b', 'c']}\n");
        make_module(dir.path(), "b", "{'depends': ['c', 'a']}\n");
        make_module(dir.path(), "c", "{'depends': []}\n");

        let mut parser = parser_for(dir.path());
        let deps = parser.get_all_dependencies_recursive("a");
        assert_eq!(deps, vec!["b", "c"]);
    }

    #[test]
    fn recursive_dependencies_skip_missing_modules() {
        let dir = TempDir::new().unwrap();
        make_module(dir.path(), "a", "{'depends': ['ghost', 'b']}\n");
        make_module(dir.path(), "b", "{'depends': []}\n");

        let mut parser = parser_for(dir.path());
        assert_eq!(
            parser.get_all_dependencies_recursive("a"),
            vec!["ghost", "b"]
        );
    }

    #[test]
    fn module_info_applies_defaults() {
        let dir = TempDir::new().unwrap();
        let path = make_module(dir.path(), "bare", "{'depends': ['base']}\n");

        let mut parser = parser_for(dir.path());
        let info = parser.get_module_info("bare", &path);
        assert_eq!(info.name, "bare");
        assert_eq!(info.version, "unknown");
        assert_eq!(info.depends, vec!["base"]);
        assert_eq!(info.path, path);
    }

    #[test]
    fn list_all_modules_sorted_excluded_and_deduped() {
        let dir_a = TempDir::new().unwrap();
        let dir_b = TempDir::new().unwrap();
        make_module(dir_a.path(), "zulu", "{}\n");
        make_module(dir_a.path(), "alpha", "{}\n");
        make_module(dir_a.path(), ".hidden", "{}\n");
        fs::create_dir_all(dir_a.path().join("plain_dir")).unwrap();
        make_module(dir_b.path(), "alpha", "{}\n");
        make_module(dir_b.path(), "beta", "{}\n");

        let parser = ManifestParser::new(
            vec![dir_a.path().to_path_buf(), dir_b.path().to_path_buf()],
            vec![glob::Pattern::new(".*").unwrap()],
        );
        let names: Vec<String> = parser
            .list_all_modules()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["alpha", "zulu", "beta"]);
        // alpha resolves to the first root
        let modules = parser.list_all_modules();
        assert_eq!(modules[0].1, dir_a.path().join("alpha"));
    }
}
