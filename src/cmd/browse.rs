use crate::{
    cmd::report::{load_repository, ReportSettings},
    config::models::{
        ConfigOpts, ConfigOptsInventory, ConfigOptsLifecycle, ConfigOptsReport,
    },
    inventory::AssetType,
    io::Scanner,
    report::Terminal,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Browse assets by office and type, interactively.
#[derive(Debug, Args)]
#[clap(name = "browse")]
pub struct BrowseCmd {
    #[clap(flatten)]
    pub report: ConfigOptsReport,
    #[clap(flatten)]
    pub inventory: ConfigOptsInventory,
    #[clap(flatten)]
    pub lifecycle: ConfigOptsLifecycle,
}

impl BrowseCmd {
    #[tracing::instrument(level = "trace", skip(self, config))]
    pub async fn run(self, config: Option<PathBuf>) -> Result<()> {
        let cli_cfg = ConfigOpts {
            report: Some(self.report),
            inventory: Some(self.inventory),
            lifecycle: Some(self.lifecycle),
            ..Default::default()
        };
        let opts = ConfigOpts::full(config, Some(cli_cfg))?;

        let settings = ReportSettings::from_opts(&opts)?;
        let repo = load_repository(&opts)?;

        let runtime = tokio::runtime::Handle::current();
        let mut scanner = Scanner::new(runtime);

        println!("Welcome to the asset tracker.\n");
        loop {
            // Step 1: office, which also picks the currency
            let office = scanner
                .prompt_menu(
                    "(Step 1 of 2) Choose an office",
                    &settings.offices,
                    "All offices",
                )
                .await?
                .and_then(|idx| settings.offices.get(idx));

            // Step 2: asset type
            let asset_type = scanner
                .prompt_menu(
                    "(Step 2 of 2) Choose an asset type",
                    &AssetType::ALL,
                    "All types",
                )
                .await?
                .and_then(|idx| AssetType::ALL.get(idx).copied());

            println!();
            let mut sink = Terminal::stdout(settings.color);
            settings.render(
                &repo,
                asset_type,
                office.map(|o| o.country.as_str()),
                &mut sink,
            )?;
            println!();

            let again = scanner
                .prompt_yes_or_no("Search again?", "y/N")
                .await?
                .unwrap_or(false);
            if !again {
                break;
            }
        }
        Ok(())
    }
}
