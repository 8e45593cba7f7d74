//! Model declaration extraction from Odoo Python source files.
//!
//! Parses each file with the rustpython grammar and walks the resulting
//! syntax tree without ever executing the analyzed code. Only a fixed
//! vocabulary of declaration shapes is recognized; everything else in a file
//! is ignored, and files that fail to parse contribute nothing.

use crate::error::{InspectError, Result};
use crate::models::declaration::{FieldInfo, ModelDeclaration, FIELD_TYPES, MODEL_BASE_CLASSES};
use rustpython_parser::{ast, Parse};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parser for Odoo model files.
///
/// Results are memoized per absolute file path for the life of the instance;
/// one instance is constructed per top-level invocation.
pub struct ModelParser {
    cache: HashMap<PathBuf, Vec<ModelDeclaration>>,
}

impl ModelParser {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Parse a Python file and extract its model declarations.
    ///
    /// Never fails: unreadable or malformed files yield an empty list and a
    /// warning on stderr.
    pub fn parse_file(&mut self, path: &Path, module: &str) -> Vec<ModelDeclaration> {
        if let Some(cached) = self.cache.get(path) {
            return cached.clone();
        }

        let declarations = match extract_declarations(path, module) {
            Ok(declarations) => declarations,
            Err(err) => {
                eprintln!("Warning: {}", err);
                Vec::new()
            }
        };

        self.cache.insert(path.to_path_buf(), declarations.clone());
        declarations
    }

    /// Find model declarations in a module's `models/` directory.
    ///
    /// Walks the directory recursively in file-name order, skipping files
    /// whose name starts with `__`. When `model` is given, only declarations
    /// defining or extending that identity are returned.
    pub fn find_models_in_module(
        &mut self,
        module_path: &Path,
        module: &str,
        model: Option<&str>,
    ) -> Vec<ModelDeclaration> {
        let models_dir = module_path.join("models");
        if !models_dir.is_dir() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&models_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    eprintln!(
                        "Warning: cannot read entry under {}: {}",
                        models_dir.display(),
                        err
                    );
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("py") {
                continue;
            }
            if entry.file_name().to_string_lossy().starts_with("__") {
                continue;
            }

            let mut declarations = self.parse_file(path, module);
            if let Some(model) = model {
                declarations.retain(|decl| decl.matches(model));
            }
            found.extend(declarations);
        }

        found
    }
}

impl Default for ModelParser {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_declarations(path: &Path, module: &str) -> Result<Vec<ModelDeclaration>> {
    let source = fs::read_to_string(path).map_err(|source| InspectError::IoRead {
        path: path.to_path_buf(),
        source,
    })?;
    let suite = ast::Suite::parse(&source, &path.to_string_lossy()).map_err(|err| {
        InspectError::Inspection {
            message: format!("parsing {}: {}", path.display(), err),
        }
    })?;

    let mut declarations = Vec::new();
    collect_classes(&suite, &mut |class| {
        if let Some(declaration) = parse_class(class, module, path, &source) {
            declarations.push(declaration);
        }
    });
    Ok(declarations)
}

/// Visit every class definition in the tree, including nested ones
fn collect_classes<'a>(stmts: &'a [ast::Stmt], visit: &mut impl FnMut(&'a ast::StmtClassDef)) {
    for stmt in stmts {
        match stmt {
            ast::Stmt::ClassDef(class) => {
                visit(class);
                collect_classes(&class.body, visit);
            }
            ast::Stmt::FunctionDef(def) => collect_classes(&def.body, visit),
            ast::Stmt::AsyncFunctionDef(def) => collect_classes(&def.body, visit),
            ast::Stmt::If(stmt) => {
                collect_classes(&stmt.body, visit);
                collect_classes(&stmt.orelse, visit);
            }
            ast::Stmt::For(stmt) => {
                collect_classes(&stmt.body, visit);
                collect_classes(&stmt.orelse, visit);
            }
            ast::Stmt::AsyncFor(stmt) => {
                collect_classes(&stmt.body, visit);
                collect_classes(&stmt.orelse, visit);
            }
            ast::Stmt::While(stmt) => {
                collect_classes(&stmt.body, visit);
                collect_classes(&stmt.orelse, visit);
            }
            ast::Stmt::With(stmt) => collect_classes(&stmt.body, visit),
            ast::Stmt::AsyncWith(stmt) => collect_classes(&stmt.body, visit),
            ast::Stmt::Try(stmt) => {
                collect_classes(&stmt.body, visit);
                for handler in &stmt.handlers {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    collect_classes(&handler.body, visit);
                }
                collect_classes(&stmt.orelse, visit);
                collect_classes(&stmt.finalbody, visit);
            }
            _ => {}
        }
    }
}

/// Parse one class definition into a model declaration, if it qualifies
fn parse_class(
    class: &ast::StmtClassDef,
    module: &str,
    path: &Path,
    source: &str,
) -> Option<ModelDeclaration> {
    let is_model_class = class.bases.iter().any(|base| {
        dotted_name(base).map_or(false, |name| MODEL_BASE_CLASSES.contains(&name.as_str()))
    });
    if !is_model_class {
        return None;
    }

    let line = line_number(source, class.range.start().into());
    let mut declaration = ModelDeclaration::new(module, path, line);

    // Only direct statements of the class body count; nested scopes are
    // scanned separately for super calls inside methods.
    for stmt in &class.body {
        match stmt {
            ast::Stmt::Assign(assign) => parse_assignment(assign, &mut declaration),
            ast::Stmt::FunctionDef(def) => parse_method(&def.name, &def.body, &mut declaration),
            ast::Stmt::AsyncFunctionDef(def) => {
                parse_method(&def.name, &def.body, &mut declaration)
            }
            _ => {}
        }
    }

    if declaration.model_name.is_some() || !declaration.inherits.is_empty() {
        Some(declaration)
    } else {
        None
    }
}

fn parse_assignment(assign: &ast::StmtAssign, declaration: &mut ModelDeclaration) {
    for target in &assign.targets {
        let ast::Expr::Name(name) = target else {
            continue;
        };

        match name.id.as_str() {
            "_name" => {
                if let Some(value) = string_literal(&assign.value) {
                    declaration.model_name = Some(value);
                    declaration.is_base = true;
                }
            }
            "_inherit" => {
                let inherits = inherit_list(&assign.value);
                if declaration.model_name.is_none() {
                    declaration.model_name = inherits.first().cloned();
                }
                declaration.inherits = inherits;
            }
            field_name => {
                if let Some(info) = field_info(&assign.value) {
                    declaration.fields.insert(field_name.to_string(), info);
                }
            }
        }
    }
}

fn parse_method(name: &ast::Identifier, body: &[ast::Stmt], declaration: &mut ModelDeclaration) {
    let method_name = name.as_str();

    // Skip dunder methods, but keep Odoo conventions like _compute_*
    if method_name.starts_with("__") {
        return;
    }

    let has_super = body.iter().any(stmt_contains_super);
    declaration.methods.insert(method_name.to_string(), has_super);
}

/// Test whether an assignment value is a field constructor call and extract
/// its type tag and required flag
fn field_info(expr: &ast::Expr) -> Option<FieldInfo> {
    let ast::Expr::Call(call) = expr else {
        return None;
    };
    let func_name = dotted_name(&call.func)?;
    if !func_name.contains("fields.") && !FIELD_TYPES.iter().any(|ft| func_name.contains(ft)) {
        return None;
    }

    let field_type = FIELD_TYPES.iter().find(|ft| func_name.contains(*ft))?;

    let required = call
        .keywords
        .iter()
        .find(|keyword| keyword.arg.as_ref().map(|arg| arg.as_str()) == Some("required"))
        .map(|keyword| constant_truthy(&keyword.value))
        .unwrap_or(false);

    Some(FieldInfo {
        field_type: (*field_type).to_string(),
        required,
    })
}

/// Resolve a Name or dotted Attribute chain to a flat dotted string
/// (e.g. `fields.Char`)
fn dotted_name(expr: &ast::Expr) -> Option<String> {
    match expr {
        ast::Expr::Name(name) => Some(name.id.to_string()),
        ast::Expr::Attribute(attr) => match dotted_name(&attr.value) {
            Some(prefix) => Some(format!("{}.{}", prefix, attr.attr.as_str())),
            None => Some(attr.attr.to_string()),
        },
        _ => None,
    }
}

fn string_literal(expr: &ast::Expr) -> Option<String> {
    match expr {
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Str(value) => Some(value.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// `_inherit` accepts a single string literal or a list of string literals;
/// non-string list elements are skipped
fn inherit_list(expr: &ast::Expr) -> Vec<String> {
    match expr {
        ast::Expr::Constant(_) => string_literal(expr).into_iter().collect(),
        ast::Expr::List(list) => list.elts.iter().filter_map(string_literal).collect(),
        _ => Vec::new(),
    }
}

fn constant_truthy(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Bool(value) => *value,
            ast::Constant::Int(value) => value.to_string() != "0",
            ast::Constant::Float(value) => *value != 0.0,
            ast::Constant::Str(value) => !value.is_empty(),
            _ => false,
        },
        _ => false,
    }
}

fn line_number(source: &str, offset: u32) -> usize {
    let end = (offset as usize).min(source.len());
    source[..end].bytes().filter(|&b| b == b'\n').count() + 1
}

fn stmt_contains_super(stmt: &ast::Stmt) -> bool {
    match stmt {
        ast::Stmt::FunctionDef(s) => s.body.iter().any(stmt_contains_super),
        ast::Stmt::AsyncFunctionDef(s) => s.body.iter().any(stmt_contains_super),
        ast::Stmt::Return(s) => s.value.as_deref().map_or(false, expr_contains_super),
        ast::Stmt::Assign(s) => {
            expr_contains_super(&s.value) || s.targets.iter().any(expr_contains_super)
        }
        ast::Stmt::AugAssign(s) => expr_contains_super(&s.value),
        ast::Stmt::AnnAssign(s) => s.value.as_deref().map_or(false, expr_contains_super),
        ast::Stmt::For(s) => {
            expr_contains_super(&s.iter)
                || s.body.iter().any(stmt_contains_super)
                || s.orelse.iter().any(stmt_contains_super)
        }
        ast::Stmt::AsyncFor(s) => {
            expr_contains_super(&s.iter)
                || s.body.iter().any(stmt_contains_super)
                || s.orelse.iter().any(stmt_contains_super)
        }
        ast::Stmt::While(s) => {
            expr_contains_super(&s.test)
                || s.body.iter().any(stmt_contains_super)
                || s.orelse.iter().any(stmt_contains_super)
        }
        ast::Stmt::If(s) => {
            expr_contains_super(&s.test)
                || s.body.iter().any(stmt_contains_super)
                || s.orelse.iter().any(stmt_contains_super)
        }
        ast::Stmt::With(s) => {
            s.items
                .iter()
                .any(|item| expr_contains_super(&item.context_expr))
                || s.body.iter().any(stmt_contains_super)
        }
        ast::Stmt::AsyncWith(s) => {
            s.items
                .iter()
                .any(|item| expr_contains_super(&item.context_expr))
                || s.body.iter().any(stmt_contains_super)
        }
        ast::Stmt::Raise(s) => {
            s.exc.as_deref().map_or(false, expr_contains_super)
                || s.cause.as_deref().map_or(false, expr_contains_super)
        }
        ast::Stmt::Try(s) => {
            s.body.iter().any(stmt_contains_super)
                || s.handlers.iter().any(|handler| {
                    let ast::ExceptHandler::ExceptHandler(handler) = handler;
                    handler.body.iter().any(stmt_contains_super)
                })
                || s.orelse.iter().any(stmt_contains_super)
                || s.finalbody.iter().any(stmt_contains_super)
        }
        ast::Stmt::Assert(s) => {
            expr_contains_super(&s.test) || s.msg.as_deref().map_or(false, expr_contains_super)
        }
        ast::Stmt::Expr(s) => expr_contains_super(&s.value),
        _ => false,
    }
}

fn expr_contains_super(expr: &ast::Expr) -> bool {
    match expr {
        ast::Expr::Call(call) => {
            if dotted_name(&call.func).as_deref() == Some("super") {
                return true;
            }
            expr_contains_super(&call.func)
                || call.args.iter().any(expr_contains_super)
                || call
                    .keywords
                    .iter()
                    .any(|keyword| expr_contains_super(&keyword.value))
        }
        ast::Expr::BoolOp(e) => e.values.iter().any(expr_contains_super),
        ast::Expr::BinOp(e) => expr_contains_super(&e.left) || expr_contains_super(&e.right),
        ast::Expr::UnaryOp(e) => expr_contains_super(&e.operand),
        ast::Expr::Lambda(e) => expr_contains_super(&e.body),
        ast::Expr::IfExp(e) => {
            expr_contains_super(&e.test)
                || expr_contains_super(&e.body)
                || expr_contains_super(&e.orelse)
        }
        ast::Expr::Dict(e) => {
            e.keys.iter().flatten().any(expr_contains_super)
                || e.values.iter().any(expr_contains_super)
        }
        ast::Expr::Set(e) => e.elts.iter().any(expr_contains_super),
        ast::Expr::ListComp(e) => {
            expr_contains_super(&e.elt) || e.generators.iter().any(comprehension_contains_super)
        }
        ast::Expr::SetComp(e) => {
            expr_contains_super(&e.elt) || e.generators.iter().any(comprehension_contains_super)
        }
        ast::Expr::GeneratorExp(e) => {
            expr_contains_super(&e.elt) || e.generators.iter().any(comprehension_contains_super)
        }
        ast::Expr::DictComp(e) => {
            expr_contains_super(&e.key)
                || expr_contains_super(&e.value)
                || e.generators.iter().any(comprehension_contains_super)
        }
        ast::Expr::Await(e) => expr_contains_super(&e.value),
        ast::Expr::Yield(e) => e.value.as_deref().map_or(false, expr_contains_super),
        ast::Expr::YieldFrom(e) => expr_contains_super(&e.value),
        ast::Expr::Compare(e) => {
            expr_contains_super(&e.left) || e.comparators.iter().any(expr_contains_super)
        }
        ast::Expr::FormattedValue(e) => expr_contains_super(&e.value),
        ast::Expr::JoinedStr(e) => e.values.iter().any(expr_contains_super),
        ast::Expr::Attribute(e) => expr_contains_super(&e.value),
        ast::Expr::Subscript(e) => {
            expr_contains_super(&e.value) || expr_contains_super(&e.slice)
        }
        ast::Expr::Starred(e) => expr_contains_super(&e.value),
        ast::Expr::List(e) => e.elts.iter().any(expr_contains_super),
        ast::Expr::Tuple(e) => e.elts.iter().any(expr_contains_super),
        ast::Expr::Slice(e) => {
            e.lower.as_deref().map_or(false, expr_contains_super)
                || e.upper.as_deref().map_or(false, expr_contains_super)
                || e.step.as_deref().map_or(false, expr_contains_super)
        }
        ast::Expr::NamedExpr(e) => {
            expr_contains_super(&e.target) || expr_contains_super(&e.value)
        }
        _ => false,
    }
}

fn comprehension_contains_super(comp: &ast::Comprehension) -> bool {
    expr_contains_super(&comp.iter)
        || expr_contains_super(&comp.target)
        || comp.ifs.iter().any(expr_contains_super)
}
