use oxc_span::Span;
use std::path::{Path, PathBuf};

/// A parsed source file, reduced to what barrel analysis needs.
#[derive(Debug, Clone)]
pub struct Module {
    pub path: PathBuf,
    pub source: String,
    pub exports: Vec<ExportDecl>,
    pub imports: Vec<ImportDecl>,
}

impl Module {
    /// Maps a local name back to the import binding that introduced it.
    pub fn import_binding(&self, local: &str) -> Option<(&ImportDecl, &Binding)> {
        self.imports.iter().find_map(|decl| {
            decl.bindings.iter().find(|b| b.local_name == local).map(|b| (decl, b))
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDecl {
    /// `export const a`, `export { a as b }`, `export default a`
    Local { exported: String, local: String },
    /// `export { a as b } from "x"`
    Named { exported: String, imported: String, specifier: String },
    /// `export * from "x"`
    Star { specifier: String },
    /// `export * as ns from "x"`
    Namespace { exported: String, specifier: String },
}

impl ExportDecl {
    /// The `from "..."` specifier, present only on re-exports.
    pub fn module_specifier(&self) -> Option<&str> {
        match self {
            ExportDecl::Local { .. } => None,
            ExportDecl::Named { specifier, .. }
            | ExportDecl::Star { specifier }
            | ExportDecl::Namespace { specifier, .. } => Some(specifier.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub module_specifier: String,
    pub bindings: Vec<Binding>,
    /// `import type { ... }`
    pub type_only: bool,
    pub span: Span,
    pub quote: char,
    pub has_semicolon: bool,
    /// `with { type: "json" }` and friends; such imports are never rewritten.
    pub has_attributes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Default,
    Namespace,
    Named,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub kind: BindingKind,
    /// Name exported by the target module: `default` for default imports,
    /// `*` for namespace imports.
    pub imported_name: String,
    pub local_name: String,
    /// Per-specifier `type` modifier (`import { type A }`).
    pub type_only: bool,
}

impl Binding {
    pub fn local_alias(&self) -> Option<&str> {
        (self.local_name != self.imported_name).then_some(self.local_name.as_str())
    }
}

/// Where a traced binding is really declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub declaring_module: PathBuf,
    /// Name under which `declaring_module` exports the value.
    pub declared_name: String,
}
