//! File extension tables shared by the enumerator, the resolver and the
//! path rewriter.
//!
//! ## Module System Extensions
//!
//! - `.mts` and `.mjs`: ES Module files
//! - `.cts` and `.cjs`: CommonJS files
//!
//! TypeScript expects `.mts`/`.cts` sources to be imported through their
//! emitted `.mjs`/`.cjs` names, which is why [`EMITTED_EXTENSIONS`] exists.

/// Extensions processed when the caller does not pass `--extensions`.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx"];

/// Extensions to try when resolving module imports (in priority order)
pub const RESOLVE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Index file names to try when resolving directory imports
pub const INDEX_FILES: &[&str] = &[
    "index.ts",
    "index.tsx",
    "index.mts",
    "index.cts",
    "index.js",
    "index.jsx",
    "index.mjs",
    "index.cjs",
];

/// Suffixes dropped from a target path when it becomes an import specifier.
/// `.d.ts` comes first so declaration files lose both parts.
pub const STRIPPED_SUFFIXES: &[&str] = &[".d.ts", ".ts", ".tsx", ".js", ".jsx"];

/// Source extensions that must be imported under their emitted name.
pub const EMITTED_EXTENSIONS: &[(&str, &str)] = &[("mts", "mjs"), ("cts", "cjs")];

/// Written extensions that may stand for a TypeScript source on disk.
pub const SOURCE_SUBSTITUTES: &[(&str, &[&str])] = &[
    ("js", &["ts", "tsx"]),
    ("jsx", &["tsx"]),
    ("mjs", &["mts"]),
    ("cjs", &["cts"]),
];

/// Stem suffix that marks a file as a barrel candidate during discovery.
pub const INDEX_STEM: &str = "index";

/// Upper bound on re-export hops followed for a single binding.
pub const DEFAULT_MAX_HOPS: usize = 32;

/// Number of parsed modules kept alive by a rewrite run.
pub const DEFAULT_CACHE_SIZE: usize = 256;
