use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::ModuleError,
    types::{Binding, BindingKind, ExportDecl, ImportDecl, Module},
};

/// Reads and parses `file` into an owned [`Module`].
pub fn parse_module(file: &Path) -> Result<Module, ModuleError> {
    trace!("Parsing module: {}", file.display());
    let src = fs::read_to_string(file)
        .map_err(|source| ModuleError::Read { path: file.to_path_buf(), source })?;
    parse_source(file, src)
}

/// Parses already loaded source text. The path only picks the source type.
pub fn parse_source(file: &Path, src: String) -> Result<Module, ModuleError> {
    let (exports, imports) = declarations(file, &src)?;
    debug!(
        "Parsed {}: {} exports, {} imports",
        file.display(),
        exports.len(),
        imports.len()
    );
    Ok(Module { path: PathBuf::from(file), source: src, exports, imports })
}

/// Extracts the owned declarations; the AST and its arena die here.
fn declarations(
    file: &Path,
    src: &str,
) -> Result<(Vec<ExportDecl>, Vec<ImportDecl>), ModuleError> {
    let st = source_type_for(file);
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } =
        OxcParser::new(&allocator, src, st).parse();

    if panicked || !errors.is_empty() {
        let message = errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "parser aborted".to_string());
        return Err(ModuleError::Parse { path: file.to_path_buf(), message });
    }

    let mut exports: Vec<ExportDecl> = Vec::new();
    let mut imports: Vec<ImportDecl> = Vec::new();

    for stmt in &program.body {
        match stmt {
            Statement::ImportDeclaration(decl) => {
                imports.push(import_decl(decl, src));
            }
            Statement::ExportNamedDeclaration(decl) => {
                collect_named_exports(decl, &mut exports);
            }
            Statement::ExportAllDeclaration(decl) => {
                let specifier = decl.source.value.to_string();
                match &decl.exported {
                    Some(name) => {
                        trace!("Found namespace re-export '{}' from '{}'", name.name(), specifier);
                        exports.push(ExportDecl::Namespace {
                            exported: name.name().to_string(),
                            specifier,
                        });
                    }
                    None => {
                        trace!("Found star re-export from '{}'", specifier);
                        exports.push(ExportDecl::Star { specifier });
                    }
                }
            }
            Statement::ExportDefaultDeclaration(decl) => {
                // `export default foo` may point at an import; anything else lives here
                let local = match &decl.declaration {
                    ExportDefaultDeclarationKind::Identifier(ident) => ident.name.to_string(),
                    _ => "default".to_string(),
                };
                exports.push(ExportDecl::Local { exported: "default".to_string(), local });
            }
            _ => {}
        }
    }

    Ok((exports, imports))
}

fn import_decl(decl: &ImportDeclaration, src: &str) -> ImportDecl {
    let mut bindings = Vec::new();
    if let Some(specifiers) = &decl.specifiers {
        for spec in specifiers {
            let binding = match spec {
                ImportDeclarationSpecifier::ImportSpecifier(s) => Binding {
                    kind: BindingKind::Named,
                    imported_name: s.imported.name().to_string(),
                    local_name: s.local.name.to_string(),
                    type_only: s.import_kind.is_type(),
                },
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => Binding {
                    kind: BindingKind::Default,
                    imported_name: "default".to_string(),
                    local_name: s.local.name.to_string(),
                    type_only: false,
                },
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => Binding {
                    kind: BindingKind::Namespace,
                    imported_name: "*".to_string(),
                    local_name: s.local.name.to_string(),
                    type_only: false,
                },
            };
            bindings.push(binding);
        }
    }

    let text = &src[decl.span.start as usize..decl.span.end as usize];
    let quote = match src.as_bytes().get(decl.source.span.start as usize) {
        Some(b'\'') => '\'',
        _ => '"',
    };

    trace!("Found import '{}' with {} bindings", decl.source.value, bindings.len());
    ImportDecl {
        module_specifier: decl.source.value.to_string(),
        bindings,
        type_only: decl.import_kind.is_type(),
        span: decl.span,
        quote,
        has_semicolon: text.trim_end().ends_with(';'),
        has_attributes: decl.with_clause.is_some(),
    }
}

fn collect_named_exports(decl: &ExportNamedDeclaration, exports: &mut Vec<ExportDecl>) {
    if let Some(source) = &decl.source {
        let specifier = source.value.to_string();
        for spec in &decl.specifiers {
            trace!("Found re-export '{}' from '{}'", spec.exported.name(), specifier);
            exports.push(ExportDecl::Named {
                exported: spec.exported.name().to_string(),
                imported: spec.local.name().to_string(),
                specifier: specifier.clone(),
            });
        }
        return;
    }

    for spec in &decl.specifiers {
        exports.push(ExportDecl::Local {
            exported: spec.exported.name().to_string(),
            local: spec.local.name().to_string(),
        });
    }

    if let Some(declaration) = &decl.declaration {
        for name in declared_names(declaration) {
            exports.push(ExportDecl::Local { exported: name.clone(), local: name });
        }
    }
}

fn declared_names(declaration: &Declaration) -> Vec<String> {
    match declaration {
        Declaration::VariableDeclaration(var_decl) => var_decl
            .declarations
            .iter()
            .flat_map(|d| d.id.get_binding_identifiers())
            .map(|id| id.name.to_string())
            .collect(),
        other => other.id().map(|id| vec![id.name.to_string()]).unwrap_or_default(),
    }
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    SourceType::default()
        .with_jsx(matches!(ext, Some("tsx" | "jsx" | "js" | "mjs" | "cjs")))
        .with_typescript(matches!(ext, Some("ts" | "tsx" | "mts" | "cts")))
        .with_module(!matches!(ext, Some("cjs" | "cts")))
}
