use dashmap::DashMap;
use log::{debug, trace};
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::{
    aliases::AliasTable,
    constants::{INDEX_FILES, RESOLVE_EXTENSIONS, SOURCE_SUBSTITUTES},
};

/// Maps import specifiers to project files. Package imports (anything that
/// is neither relative nor aliased) resolve to `None` and are left alone.
pub struct Resolver {
    root: PathBuf,
    aliases: AliasTable,
    cache: DashMap<(PathBuf, String), Option<PathBuf>>,
}

impl Resolver {
    pub fn new(root: PathBuf, aliases: AliasTable) -> Self {
        Self { root, aliases, cache: DashMap::new() }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn cached_resolutions(&self) -> usize {
        self.cache.len()
    }

    pub fn resolve(&self, from_file: &Path, request: &str) -> Option<PathBuf> {
        let key = (from_file.to_path_buf(), request.to_string());
        if let Some(v) = self.cache.get(&key) {
            trace!("Cache hit for resolve: '{}' from {}", request, from_file.display());
            return v.clone();
        }
        trace!("Resolving: '{}' from {}", request, from_file.display());

        let resolved = if request.starts_with("./")
            || request.starts_with("../")
            || request == "."
            || request == ".."
            || request.starts_with('/')
        {
            let base = from_file.parent().unwrap_or(&self.root);
            let p = PathBuf::from(clean(base.join(request)));
            let result = resolve_file(&p);
            if result.is_none() {
                trace!("Failed to resolve relative import '{}'", request);
            }
            result
        } else {
            trace!("Checking path aliases for '{}'", request);
            let result = self.aliases.candidates(request).iter().find_map(|c| resolve_file(c));
            if result.is_none() {
                trace!("Treating '{}' as a package import", request);
            }
            result
        };

        if let Some(path) = &resolved {
            debug!("Resolved '{}' from {} to {}", request, from_file.display(), path.display());
        }
        self.cache.insert(key, resolved.clone());
        resolved
    }
}

fn resolve_file(p: &Path) -> Option<PathBuf> {
    // Try exact path first
    if p.is_file() {
        return Some(canonical(p.to_path_buf()));
    }

    // Try adding extensions
    for ext in RESOLVE_EXTENSIONS {
        let candidate = PathBuf::from(format!("{}.{}", p.display(), ext));
        if candidate.is_file() {
            return Some(canonical(candidate));
        }
    }

    // Try index files
    for index_file in INDEX_FILES {
        let candidate = p.join(index_file);
        if candidate.is_file() {
            return Some(canonical(candidate));
        }
    }

    // `./button.js` written for a `button.ts` source
    let ext = p.extension().and_then(|e| e.to_str())?;
    let (_, substitutes) = SOURCE_SUBSTITUTES.iter().find(|(written, _)| *written == ext)?;
    substitutes.iter().map(|s| p.with_extension(s)).find(|c| c.is_file()).map(canonical)
}

fn canonical(p: PathBuf) -> PathBuf {
    p.canonicalize().unwrap_or(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::AliasEntry;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path.canonicalize().unwrap()
    }

    fn project() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().canonicalize().unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_relative_with_extension_probe() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");
        let button = create_test_file(&root, "src/components/button.tsx", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        assert_eq!(resolver.resolve(&app, "./components/button"), Some(button));
    }

    #[test]
    fn test_directory_resolves_to_index() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");
        let index = create_test_file(&root, "src/components/index.ts", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        assert_eq!(resolver.resolve(&app, "./components"), Some(index.clone()));
        assert_eq!(resolver.resolve(&app, "./components/index"), Some(index));
    }

    #[test]
    fn test_parent_directory() {
        let (_tmp, root) = project();
        let nested = create_test_file(&root, "src/a/b/c.ts", "");
        let index = create_test_file(&root, "src/index.ts", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        assert_eq!(resolver.resolve(&nested, "../.."), Some(index));
    }

    #[test]
    fn test_js_specifier_for_ts_source() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");
        let button = create_test_file(&root, "src/button.ts", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        assert_eq!(resolver.resolve(&app, "./button.js"), Some(button));
    }

    #[test]
    fn test_package_import_is_unresolved() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        assert_eq!(resolver.resolve(&app, "react"), None);
        assert_eq!(resolver.resolve(&app, "./missing"), None);
    }

    #[test]
    fn test_alias_resolution() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");
        let index = create_test_file(&root, "src/components/index.ts", "");

        let aliases = AliasTable::new(vec![AliasEntry {
            prefix: "@components/".to_string(),
            wildcard: true,
            targets: vec![root.join("src/components")],
        }]);
        let exact = AliasTable::new(vec![AliasEntry {
            prefix: "@components".to_string(),
            wildcard: false,
            targets: vec![root.join("src/components")],
        }]);

        let resolver = Resolver::new(root.clone(), aliases);
        assert_eq!(resolver.resolve(&app, "@components/index"), Some(index.clone()));

        let resolver = Resolver::new(root.clone(), exact);
        assert_eq!(resolver.resolve(&app, "@components"), Some(index));
    }

    #[test]
    fn test_resolution_is_cached() {
        let (_tmp, root) = project();
        let app = create_test_file(&root, "src/app.ts", "");
        create_test_file(&root, "src/a.ts", "");

        let resolver = Resolver::new(root.clone(), AliasTable::default());
        resolver.resolve(&app, "./a");
        resolver.resolve(&app, "./a");
        resolver.resolve(&app, "react");
        assert_eq!(resolver.cached_resolutions(), 2);
    }
}
