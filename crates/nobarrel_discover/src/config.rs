use clap::Args;
use nobarrel_core::ProjectConfig;

#[derive(Debug, Clone, Default, Args)]
pub struct DiscoverConfig {
    #[command(flatten)]
    pub project: ProjectConfig,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
