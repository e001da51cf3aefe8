use crate::{
    config::models::{ConfigOpts, ConfigOptsInventory},
    inventory::{source, AssetRepository},
    io::encoding::Encoding,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Inspect your asset inventory.
#[derive(Debug, Args)]
#[clap(name = "inventory")]
pub struct InventoryCmd {
    #[clap(subcommand)]
    action: InventorySubcommands,
    #[clap(flatten)]
    pub cfg: ConfigOptsInventory,
}

#[derive(Clone, Debug, Subcommand)]
enum InventorySubcommands {
    /// Print the valid assets of your inventory.
    Show {
        /// The output format.
        #[clap(short, long, value_enum, default_value = "yaml")]
        format: Encoding,
    },
    /// Print invalid assets of your inventory.
    Check,
}

impl InventoryCmd {
    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        let cli_cfg = ConfigOpts {
            inventory: Some(self.cfg),
            ..Default::default()
        };
        let opts = ConfigOpts::full(config, Some(cli_cfg))?;

        match self.action {
            InventorySubcommands::Show { format } => show(&opts, format),
            InventorySubcommands::Check => check(&opts),
        }
    }
}

fn show(opts: &ConfigOpts, format: Encoding) -> Result<()> {
    let repo = crate::cmd::report::load_repository(opts)?;
    if repo.is_empty() {
        println!("Inventory is empty.");
    } else {
        print!("{}", format.encode(&repo.to_data())?);
    }
    Ok(())
}

fn check(opts: &ConfigOpts) -> Result<()> {
    let path = opts.inventory.as_ref().and_then(|i| i.path.as_deref());
    let source = source::from_path(path);
    println!("Checking {}...", source.describe());
    let (repo, summary) = AssetRepository::from_source(source.as_ref())?;

    for asset in &repo {
        println!("VALID: {}", asset);
    }
    for (idx, record, err) in &summary.rejected {
        println!(
            "INVALID: #{} {} {} | {}",
            idx + 1,
            record.brand,
            record.model,
            err
        );
    }

    // Print summary
    println!(
        "✅ {} VALID, ❌ {} INVALID",
        summary.loaded,
        summary.rejected.len()
    );
    Ok(())
}
