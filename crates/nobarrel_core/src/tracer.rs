//! Follows re-export chains from a barrel to the module that declares a
//! binding.
//!
//! Lookup order inside one module: explicit exports (local declarations,
//! `export { a } from`, `export * as ns from`) in source order, then every
//! `export * from` in source order. `default` is never forwarded by a star
//! export.

use log::{trace, warn};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    cache::ModuleCache,
    resolver::Resolver,
    types::{ExportDecl, Symbol},
};

/// Outcome of looking a name up in one module.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Lookup {
    Declared(Symbol),
    /// The chain ends somewhere we can not follow: a package, a namespace
    /// re-export or an unreadable module.
    Opaque,
    NotFound,
    Cycle,
    HopLimit,
}

pub struct Tracer<'a> {
    resolver: &'a Resolver,
    max_hops: usize,
}

impl<'a> Tracer<'a> {
    pub fn new(resolver: &'a Resolver, max_hops: usize) -> Self {
        Self { resolver, max_hops }
    }

    /// Finds the module that really declares `name` as exported by `barrel`.
    /// Returns `None` when the chain can not be followed safely or when the
    /// barrel declares the binding itself.
    pub fn trace(&self, cache: &mut ModuleCache, barrel: &Path, name: &str) -> Option<Symbol> {
        let mut visited = HashSet::new();
        match self.lookup(cache, barrel, name, 0, &mut visited) {
            Lookup::Declared(symbol) if symbol.declaring_module.as_path() == barrel => {
                trace!("'{}' is declared in {} itself", name, barrel.display());
                None
            }
            Lookup::Declared(symbol) => {
                trace!(
                    "Traced '{}' from {} to '{}' in {}",
                    name,
                    barrel.display(),
                    symbol.declared_name,
                    symbol.declaring_module.display()
                );
                Some(symbol)
            }
            Lookup::Cycle => {
                warn!("Re-export cycle while tracing '{}' from {}", name, barrel.display());
                None
            }
            Lookup::HopLimit => {
                warn!(
                    "Gave up tracing '{}' from {} after {} hops",
                    name,
                    barrel.display(),
                    self.max_hops
                );
                None
            }
            Lookup::Opaque | Lookup::NotFound => {
                trace!("Could not trace '{}' from {}", name, barrel.display());
                None
            }
        }
    }

    fn lookup(
        &self,
        cache: &mut ModuleCache,
        path: &Path,
        name: &str,
        hops: usize,
        visited: &mut HashSet<(PathBuf, String)>,
    ) -> Lookup {
        if hops > self.max_hops {
            return Lookup::HopLimit;
        }
        let key = (path.to_path_buf(), name.to_string());
        if !visited.insert(key.clone()) {
            return Lookup::Cycle;
        }
        // only the current chain counts as a cycle, diamonds are fine
        let result = self.lookup_in_module(cache, path, name, hops, visited);
        visited.remove(&key);
        result
    }

    fn lookup_in_module(
        &self,
        cache: &mut ModuleCache,
        path: &Path,
        name: &str,
        hops: usize,
        visited: &mut HashSet<(PathBuf, String)>,
    ) -> Lookup {
        let module = match cache.load(path) {
            Ok(module) => module,
            Err(err) => {
                warn!("{}", err);
                return Lookup::Opaque;
            }
        };

        for export in &module.exports {
            match export {
                ExportDecl::Local { exported, local } if exported == name => {
                    // `import { a } from './a'; export { a }` is a re-export in disguise
                    if let Some((decl, binding)) = module.import_binding(local)
                        && binding.imported_name != "*"
                    {
                        let imported = binding.imported_name.clone();
                        return self.follow(
                            cache,
                            path,
                            &decl.module_specifier,
                            &imported,
                            hops,
                            visited,
                        );
                    }
                    return Lookup::Declared(Symbol {
                        declaring_module: path.to_path_buf(),
                        declared_name: exported.clone(),
                    });
                }
                ExportDecl::Named { exported, imported, specifier } if exported == name => {
                    return self.follow(cache, path, specifier, imported, hops, visited);
                }
                ExportDecl::Namespace { exported, .. } if exported == name => {
                    return Lookup::Opaque;
                }
                _ => {}
            }
        }

        if name == "default" {
            return Lookup::NotFound;
        }

        let mut saw_cycle = false;
        for export in &module.exports {
            let ExportDecl::Star { specifier } = export else {
                continue;
            };
            match self.follow(cache, path, specifier, name, hops, visited) {
                Lookup::NotFound => {}
                Lookup::Cycle => saw_cycle = true,
                found => return found,
            }
        }
        if saw_cycle { Lookup::Cycle } else { Lookup::NotFound }
    }

    fn follow(
        &self,
        cache: &mut ModuleCache,
        from: &Path,
        specifier: &str,
        name: &str,
        hops: usize,
        visited: &mut HashSet<(PathBuf, String)>,
    ) -> Lookup {
        match self.resolver.resolve(from, specifier) {
            Some(next) => self.lookup(cache, &next, name, hops + 1, visited),
            None => {
                trace!("'{}' leaves the project, not following", specifier);
                Lookup::Opaque
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::AliasTable;
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

    fn trace_name(root: &Path, barrel: &Path, name: &str, max_hops: usize) -> Option<Symbol> {
        let resolver = Resolver::new(root.to_path_buf(), AliasTable::default());
        let mut cache = ModuleCache::new(16);
        Tracer::new(&resolver, max_hops).trace(&mut cache, barrel, name)
    }

    fn symbol(path: &Path, name: &str) -> Option<Symbol> {
        Some(Symbol { declaring_module: path.to_path_buf(), declared_name: name.to_string() })
    }

    #[test]
    fn test_star_reexport() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "components/index.ts", "export * from './button';");
        let button = create_test_file(&root, "components/button.ts", "export const Button = 1;");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), symbol(&button, "Button"));
        assert_eq!(trace_name(&root, &barrel, "Missing", 32), None);
    }

    #[test]
    fn test_nested_barrels() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "index.ts", "export * from './components';");
        create_test_file(&root, "components/index.ts", "export { Button } from './button';");
        let button = create_test_file(&root, "components/button.ts", "export function Button() {}");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), symbol(&button, "Button"));
    }

    #[test]
    fn test_renamed_reexport_keeps_declared_name() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "index.ts", "export { Impl as Button } from './impl';");
        let implementation = create_test_file(&root, "impl.ts", "export class Impl {}");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), symbol(&implementation, "Impl"));
    }

    #[test]
    fn test_default_reexport() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "index.ts", "export { default as Button } from './button';");
        let button = create_test_file(&root, "button.ts", "export default function Button() {}");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), symbol(&button, "default"));
    }

    #[test]
    fn test_star_does_not_forward_default() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "index.ts", "export * from './button';");
        create_test_file(&root, "button.ts", "export default 1;");

        assert_eq!(trace_name(&root, &barrel, "default", 32), None);
    }

    #[test]
    fn test_import_then_export() {
        let (_tmp, root) = project();
        let barrel = create_test_file(
            &root,
            "index.ts",
            "import { Button as B } from './button';\nexport { B as PrimaryButton };",
        );
        let button = create_test_file(&root, "button.ts", "export const Button = 1;");

        assert_eq!(trace_name(&root, &barrel, "PrimaryButton", 32), symbol(&button, "Button"));
    }

    #[test]
    fn test_declared_in_barrel_is_not_relocated() {
        let (_tmp, root) = project();
        let barrel = create_test_file(
            &root,
            "index.ts",
            "export * from './button';\nexport const version = '1';",
        );
        create_test_file(&root, "button.ts", "export const Button = 1;");

        assert_eq!(trace_name(&root, &barrel, "version", 32), None);
    }

    #[test]
    fn test_explicit_export_wins_over_star() {
        let (_tmp, root) = project();
        let barrel = create_test_file(
            &root,
            "index.ts",
            "export * from './a';\nexport { Button } from './b';",
        );
        create_test_file(&root, "a.ts", "export const Button = 'a';");
        let b = create_test_file(&root, "b.ts", "export const Button = 'b';");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), symbol(&b, "Button"));
    }

    #[test]
    fn test_cycle_terminates() {
        let (_tmp, root) = project();
        let a = create_test_file(&root, "a/index.ts", "export * from '../b';");
        create_test_file(&root, "b/index.ts", "export * from '../a';");

        assert_eq!(trace_name(&root, &a, "Button", 32), None);
    }

    #[test]
    fn test_cycle_in_one_branch_does_not_hide_another() {
        let (_tmp, root) = project();
        let a = create_test_file(&root, "a/index.ts", "export * from '../b';\nexport * from './button';");
        create_test_file(&root, "b/index.ts", "export * from '../a';");
        let button = create_test_file(&root, "a/button.ts", "export const Button = 1;");

        assert_eq!(trace_name(&root, &a, "Button", 32), symbol(&button, "Button"));
    }

    #[test]
    fn test_hop_limit() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "l0.ts", "export * from './l1';");
        create_test_file(&root, "l1.ts", "export * from './l2';");
        create_test_file(&root, "l2.ts", "export * from './l3';");
        let leaf = create_test_file(&root, "l3.ts", "export const deep = 1;");

        assert_eq!(trace_name(&root, &barrel, "deep", 3), symbol(&leaf, "deep"));
        assert_eq!(trace_name(&root, &barrel, "deep", 2), None);
    }

    #[test]
    fn test_namespace_and_package_are_opaque() {
        let (_tmp, root) = project();
        let barrel = create_test_file(
            &root,
            "index.ts",
            "export * as utils from './utils';\nexport { useState } from 'react';\nexport * from 'lodash';",
        );
        create_test_file(&root, "utils.ts", "export const a = 1;");

        assert_eq!(trace_name(&root, &barrel, "utils", 32), None);
        assert_eq!(trace_name(&root, &barrel, "useState", 32), None);
        assert_eq!(trace_name(&root, &barrel, "debounce", 32), None);
    }

    #[test]
    fn test_unparsable_module_is_opaque() {
        let (_tmp, root) = project();
        let barrel = create_test_file(&root, "index.ts", "export * from './broken';");
        create_test_file(&root, "broken.ts", "export { from");

        assert_eq!(trace_name(&root, &barrel, "Button", 32), None);
    }
}
