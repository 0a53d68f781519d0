//! Applies a [`RewritePlan`] to the original source text.
//!
//! Only the spans of touched import declarations change. New declarations
//! take the place of the first import that contributed to them, so the
//! relative order of imports and all unrelated bytes are preserved.

use nobarrel_core::{Binding, BindingKind, Module};

use crate::types::RewritePlan;

pub fn render(module: &Module, plan: &RewritePlan) -> String {
    let source = module.source.as_str();
    let mut edits: Vec<(usize, usize, String)> = Vec::new();

    for (index, decl) in module.imports.iter().enumerate() {
        if !plan.touches(index) {
            continue;
        }
        let mut parts: Vec<String> = Vec::new();
        if let Some((_, kept)) = plan.retained.iter().find(|(i, _)| *i == index) {
            parts.push(render_import(
                &decl.module_specifier,
                kept,
                decl.type_only,
                decl.quote,
                decl.has_semicolon,
            ));
        }
        for addition in plan.additions.iter().filter(|a| a.anchor == index) {
            parts.push(render_import(
                &addition.specifier,
                &addition.bindings,
                addition.type_only,
                decl.quote,
                decl.has_semicolon,
            ));
        }

        let (start, end) = (decl.span.start as usize, decl.span.end as usize);
        if parts.is_empty() {
            let (start, end) = removal_extent(source, start, end);
            edits.push((start, end, String::new()));
        } else {
            let separator =
                format!("{}{}", line_ending(source, end), indentation(source, start));
            edits.push((start, end, parts.join(&separator)));
        }
    }

    let mut out = source.to_string();
    edits.sort_by(|a, b| b.0.cmp(&a.0));
    for (start, end, text) in edits {
        out.replace_range(start..end, &text);
    }
    out
}

/// `import { a, b as c } from './x';`
pub fn render_import(
    specifier: &str,
    bindings: &[Binding],
    type_only: bool,
    quote: char,
    semicolon: bool,
) -> String {
    let mut default: Option<&Binding> = None;
    let mut namespace: Option<&Binding> = None;
    let mut named: Vec<String> = Vec::new();
    for binding in bindings {
        match binding.kind {
            // `import type X from` can not be mixed with named bindings, so
            // type-only defaults are spelled `default as X`
            BindingKind::Default if !type_only && !binding.type_only && default.is_none() => {
                default = Some(binding)
            }
            BindingKind::Namespace => namespace = Some(binding),
            _ => named.push(render_named(binding)),
        }
    }

    let mut clause: Vec<String> = Vec::new();
    if let Some(binding) = default {
        clause.push(binding.local_name.clone());
    }
    if let Some(binding) = namespace {
        clause.push(format!("* as {}", binding.local_name));
    }
    if !named.is_empty() {
        clause.push(format!("{{ {} }}", named.join(", ")));
    }

    format!(
        "import {}{} from {}{}{}{}",
        if type_only { "type " } else { "" },
        clause.join(", "),
        quote,
        specifier,
        quote,
        if semicolon { ";" } else { "" }
    )
}

fn render_named(binding: &Binding) -> String {
    let imported = if is_identifier(&binding.imported_name) {
        binding.imported_name.clone()
    } else {
        format!("\"{}\"", binding.imported_name.replace('"', "\\\""))
    };
    let prefix = if binding.type_only { "type " } else { "" };
    match binding.local_alias() {
        Some(local) => format!("{}{} as {}", prefix, imported, local),
        None => format!("{}{}", prefix, imported),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Line terminator used by the line that ends at or after `pos`.
fn line_ending(source: &str, pos: usize) -> &'static str {
    let rest = &source[pos..];
    let crlf = match rest.find('\n') {
        Some(i) => rest[..i].ends_with('\r'),
        None => source.contains("\r\n"),
    };
    if crlf { "\r\n" } else { "\n" }
}

fn line_start(source: &str, pos: usize) -> usize {
    source[..pos].rfind('\n').map_or(0, |i| i + 1)
}

fn indentation(source: &str, pos: usize) -> &str {
    let prefix = &source[line_start(source, pos)..pos];
    if prefix.chars().all(char::is_whitespace) { prefix } else { "" }
}

/// Widens `[start, end)` to the whole line, newline included, when the
/// declaration is the only thing on it.
fn removal_extent(source: &str, start: usize, end: usize) -> (usize, usize) {
    let begin = line_start(source, start);
    let rest = &source[end..];
    let line_end = rest.find('\n').map_or(rest.len(), |i| i + 1);
    if source[begin..start].trim().is_empty() && rest[..line_end].trim().is_empty() {
        (begin, end + line_end)
    } else {
        (start, end)
    }
}
