use std::path::Path;

use crate::{constants::INDEX_STEM, types::Module};

/// A module is a barrel iff it re-exports from at least one other module.
/// The file name plays no part in this decision.
pub fn is_barrel(module: &Module) -> bool {
    module.exports.iter().any(|decl| decl.module_specifier().is_some_and(|s| !s.is_empty()))
}

/// Cheap name-based pre-filter used before parsing during discovery.
pub fn is_index_candidate(path: &Path) -> bool {
    path.file_stem().and_then(|s| s.to_str()).is_some_and(|stem| stem.ends_with(INDEX_STEM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn module(name: &str, content: &str) -> Module {
        parse_source(Path::new(name), content.to_string()).unwrap()
    }

    #[test]
    fn test_star_reexport_is_barrel() {
        assert!(is_barrel(&module("index.ts", "export * from './x';")));
    }

    #[test]
    fn test_named_reexport_is_barrel() {
        assert!(is_barrel(&module("index.ts", "export { a } from './x';")));
    }

    #[test]
    fn test_namespace_reexport_is_barrel() {
        assert!(is_barrel(&module("index.ts", "export * as x from './x';")));
    }

    #[test]
    fn test_local_exports_only_is_not_barrel() {
        assert!(!is_barrel(&module("index.ts", "export const a = 1;")));
    }

    #[test]
    fn test_no_exports_is_not_barrel() {
        assert!(!is_barrel(&module("index.ts", "const a = 1;")));
    }

    #[test]
    fn test_import_then_export_is_not_barrel() {
        assert!(!is_barrel(&module("index.ts", "import { a } from './x';\nexport { a };")));
    }

    #[test]
    fn test_name_does_not_matter() {
        assert!(is_barrel(&module("button.ts", "export * from './x';")));
    }

    #[test]
    fn test_index_candidate() {
        assert!(is_index_candidate(Path::new("/p/src/components/index.ts")));
        assert!(!is_index_candidate(Path::new("/p/src/components/index.d.ts")));
        assert!(is_index_candidate(Path::new("/p/src/routes/routeindex.tsx")));
        assert!(!is_index_candidate(Path::new("/p/src/components/button.ts")));
    }
}
