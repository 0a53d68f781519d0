use clap::Args;
use nobarrel_core::{DEFAULT_CACHE_SIZE, DEFAULT_MAX_HOPS, ProjectConfig};
use std::path::PathBuf;

use crate::types::PartialPolicy;

#[derive(Debug, Clone, Args)]
pub struct ReplaceConfig {
    #[command(flatten)]
    pub project: ProjectConfig,

    /// tsconfig.json or jsconfig.json holding path aliases, relative to the root
    #[arg(short = 'a', long)]
    pub alias_config_path: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Handling of imports where only some bindings can be relocated
    #[arg(long, value_enum, default_value_t = PartialPolicy::Split)]
    pub partial: PartialPolicy,

    /// Emit aliased specifiers when an alias reaches the target
    #[arg(long)]
    pub prefer_alias: bool,

    /// Only unroll imports of index-named barrels
    #[arg(long)]
    pub index_only: bool,

    /// Maximum re-export hops followed per binding
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS)]
    pub max_hops: usize,

    /// Number of parsed modules kept in memory
    #[arg(long, default_value_t = DEFAULT_CACHE_SIZE)]
    pub cache_size: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReplaceConfig {
    pub fn new(project: ProjectConfig, alias_config_path: impl Into<PathBuf>) -> Self {
        Self {
            project,
            alias_config_path: Some(alias_config_path.into()),
            dry_run: false,
            partial: PartialPolicy::default(),
            prefer_alias: false,
            index_only: false,
            max_hops: DEFAULT_MAX_HOPS,
            cache_size: DEFAULT_CACHE_SIZE,
            json: false,
        }
    }
}
