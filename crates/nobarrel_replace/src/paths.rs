use log::{trace, warn};
use nobarrel_core::{AliasTable, EMITTED_EXTENSIONS, STRIPPED_SUFFIXES};
use std::path::{Component, Path, PathBuf};

/// Computes the specifier `from` should use to import `to`.
///
/// The baseline is a relative path with the source extension stripped and a
/// leading `./` or `../`. When `aliases` is given and one of its wildcard
/// entries reaches `to`, the shortest aliased form is used instead.
/// Returns `None` for a self-import or when no relative path exists.
pub fn compute_import_path(from: &Path, to: &Path, aliases: Option<&AliasTable>) -> Option<String> {
    if from == to {
        warn!("Refusing to emit a self-import for {}", from.display());
        return None;
    }
    let target = strip_source_extension(to);

    if let Some(alias) = aliases.and_then(|table| table.shortest_alias_for(&target)) {
        trace!("Using alias '{}' for {}", alias, to.display());
        return Some(alias);
    }

    let base = from.parent()?;
    let relative = make_relative(&target, base)?;
    let specifier = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    // bare specifiers are reserved for packages
    if specifier.starts_with("../") {
        Some(specifier)
    } else {
        Some(format!("./{}", specifier))
    }
}

/// Drops the extension a specifier would not spell out, and maps `.mts` and
/// `.cts` sources to the `.mjs`/`.cjs` names they are imported by.
fn strip_source_extension(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_path_buf();
    };
    for suffix in STRIPPED_SUFFIXES {
        if let Some(stem) = name.strip_suffix(suffix)
            && !stem.is_empty()
        {
            return path.with_file_name(stem);
        }
    }
    let ext = path.extension().and_then(|e| e.to_str());
    match EMITTED_EXTENSIONS.iter().find(|(source, _)| Some(*source) == ext) {
        Some((_, emitted)) => path.with_extension(emitted),
        None => path.to_path_buf(),
    }
}

/// Relative path from the directory `base` to `target`. Both must be
/// absolute; `None` when they live under different roots.
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();
    if target.first() != base.first() {
        return None;
    }

    let common = target.iter().zip(&base).take_while(|(t, b)| t == b).count();
    let mut result = PathBuf::new();
    for _ in common..base.len() {
        result.push("..");
    }
    for component in &target[common..] {
        result.push(component.as_os_str());
    }
    Some(result)
}
