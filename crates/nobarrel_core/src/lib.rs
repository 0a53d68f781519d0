//! Core building blocks for barrel file analysis.
//!
//! This crate provides the functionality shared by barrel discovery and the
//! import rewriter:
//! - Parsing JS/TS modules into their import and export declarations
//! - Classifying modules as barrels
//! - Resolving specifiers (relative paths and tsconfig path aliases)
//! - Tracing re-export chains back to the declaring module
//! - Enumerating project files while honouring ignore rules

mod aliases;
mod cache;
mod classifier;
mod collector;
mod config;
mod constants;
mod error;
mod ignorer;
mod parser;
mod resolver;
mod tracer;
mod types;

// Re-export public API
pub use aliases::{AliasEntry, AliasTable, load_aliases};
pub use cache::ModuleCache;
pub use classifier::{is_barrel, is_index_candidate};
pub use collector::{CollectorConfig, collect_candidates};
pub use config::{ProjectConfig, display_path, find_git_root};
pub use constants::{
    DEFAULT_CACHE_SIZE, DEFAULT_EXTENSIONS, DEFAULT_MAX_HOPS, EMITTED_EXTENSIONS, INDEX_FILES,
    RESOLVE_EXTENSIONS, STRIPPED_SUFFIXES,
};
pub use error::ModuleError;
pub use ignorer::Ignorer;
pub use oxc_span::Span;
pub use parser::{parse_module, parse_source};
pub use resolver::Resolver;
pub use tracer::Tracer;
pub use types::{Binding, BindingKind, ExportDecl, ImportDecl, Module, Symbol};
