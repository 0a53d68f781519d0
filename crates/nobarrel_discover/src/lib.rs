//! Barrel file discovery for JavaScript/TypeScript projects.
//!
//! A barrel is a module that re-exports from at least one other module.
//! Discovery only looks at index-named files (`index.ts`, `foo-index.js`, ...)
//! and classifies them in parallel.
//!
//! # Examples
//!
//! ```no_run
//! use nobarrel_core::ProjectConfig;
//! use nobarrel_discover::find_barrel_files;
//!
//! # fn main() -> anyhow::Result<()> {
//! let result = find_barrel_files(&ProjectConfig::with_root("/path/to/project"))?;
//! for barrel in &result.barrels {
//!     println!("{}", barrel);
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod finder;
mod reporter;
mod types;

// Re-export public API
pub use config::DiscoverConfig;
pub use finder::find_barrel_files;
pub use reporter::{print_barrels, print_count, print_json};
pub use types::DiscoveryResult;
