use crate::config::{default_config_path, models::ConfigOpts};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration controls
#[derive(Debug, Args)]
#[clap(name = "config")]
pub struct ConfigCmd {
    #[clap(subcommand)]
    action: ConfigSubcommands,
}

#[derive(Clone, Debug, Subcommand)]
enum ConfigSubcommands {
    /// Show the current config pre-CLI.
    Show,
    /// Print the default config file location.
    Path,
}

impl ConfigCmd {
    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        match self.action {
            ConfigSubcommands::Show => {
                let opts = ConfigOpts::full(config, None)?;
                println!("{}", opts);
            }
            ConfigSubcommands::Path => {
                let path = config.unwrap_or_else(default_config_path);
                println!("{}", path.display());
            }
        }
        Ok(())
    }
}
