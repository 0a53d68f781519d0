//! Rewrites imports that go through barrel files so they import from the
//! declaring module directly.
//!
//! Each import whose target is a barrel has its bindings traced through the
//! re-export chain. Traced bindings are regrouped per declaring module and
//! emitted in place of the original declaration; bindings that can not be
//! traced stay where they were.
//!
//! # Examples
//!
//! ```no_run
//! use nobarrel_core::ProjectConfig;
//! use nobarrel_replace::{ReplaceConfig, run_replace};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = ReplaceConfig::new(ProjectConfig::with_root("/path/to/project"), "tsconfig.json");
//! let result = run_replace(&cfg)?;
//! println!("{} files updated", result.files_updated);
//! # Ok(())
//! # }
//! ```

mod config;
mod driver;
mod error;
mod paths;
mod planner;
mod render;
mod reporter;
mod types;

// Re-export public API
pub use config::ReplaceConfig;
pub use driver::run_replace;
pub use error::ReplaceError;
pub use paths::compute_import_path;
pub use planner::{PlanOptions, Planner};
pub use render::{render, render_import};
pub use reporter::{print_json, print_replace_summary};
pub use types::{Addition, PartialPolicy, ReplaceResult, RewritePlan};
