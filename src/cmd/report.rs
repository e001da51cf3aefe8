use crate::{
    config::models::{
        ConfigOpts, ConfigOptsInventory, ConfigOptsLifecycle, ConfigOptsReport,
    },
    currency::{CurrencyCode, RateTable},
    inventory::{
        find_office, source, AssetFilter, AssetRepository, AssetType, Office,
        SortKey,
    },
    lifecycle::{Lifecycle, TierTable},
    report::{ColorMode, LegendMode, Pricing, Report, ReportSink, Terminal},
};
use anyhow::{Context, Result};
use clap::Args;
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Print an asset report.
#[derive(Debug, Args)]
#[clap(name = "report")]
pub struct ReportCmd {
    #[clap(flatten)]
    pub report: ConfigOptsReport,
    #[clap(flatten)]
    pub inventory: ConfigOptsInventory,
    #[clap(flatten)]
    pub lifecycle: ConfigOptsLifecycle,
}

impl ReportCmd {
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
        let mut sink = Terminal::stdout(settings.color);
        settings.render(
            &repo,
            settings.asset_type,
            settings.country.as_deref(),
            &mut sink,
        )
    }
}

/// Everything needed to produce reports, resolved from config layers.
pub struct ReportSettings {
    pub rates: RateTable,
    pub lifecycle: Lifecycle,
    pub keys: Vec<SortKey>,
    pub include: Vec<Regex>,
    pub ignore: Vec<Regex>,
    pub legend: LegendMode,
    pub color: ColorMode,
    pub currency: Option<CurrencyCode>,
    pub country: Option<String>,
    pub asset_type: Option<AssetType>,
    pub offices: Vec<Office>,
}

impl ReportSettings {
    pub fn from_opts(opts: &ConfigOpts) -> Result<Self> {
        let report = opts.report.clone().unwrap_or_default();
        let lifecycle_opts = opts.lifecycle.clone().unwrap_or_default();

        let rates = match opts.rates.as_ref() {
            Some(overrides) => RateTable::default()
                .with_overrides(overrides)
                .context("error reading conversion rates")?,
            None => RateTable::default(),
        };
        debug!(
            "conversion rates for {}",
            rates
                .codes()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let table = match lifecycle_opts.bands {
            Some(bands) => {
                TierTable::new(bands).context("error reading tier bands")?
            }
            None => TierTable::preset(lifecycle_opts.tiers.unwrap_or_default()),
        };
        let lifecycle = match report.as_of {
            Some(date) => Lifecycle::new(table, date),
            None => Lifecycle::today(table),
        };

        let keys = match report.sort {
            Some(ref keys) => {
                SortKey::parse_all(keys).context("error reading sort keys")?
            }
            None => SortKey::defaults(),
        };

        let currency = report.currency.as_deref().and_then(|code| {
            code.parse::<CurrencyCode>()
                .map_err(|err| warn!("ignoring currency: {err}"))
                .ok()
        });

        Ok(Self {
            rates,
            lifecycle,
            keys,
            include: compile(report.include_models, "include_models")?,
            ignore: compile(report.ignore_models, "ignore_models")?,
            legend: report.legend.unwrap_or_default(),
            color: report.color.unwrap_or_default(),
            currency,
            country: report.country,
            asset_type: report.asset_type,
            offices: crate::inventory::default_offices(),
        })
    }

    /// The filter for one report.
    pub fn filter(
        &self,
        asset_type: Option<AssetType>,
        country: Option<&str>,
    ) -> AssetFilter {
        AssetFilter {
            include: self.include.clone(),
            ignore: self.ignore.clone(),
            ..AssetFilter::all()
        }
        .asset_type(asset_type)
        .country(country)
    }

    /// The currency to show: requested, else the office's, else the base.
    pub fn target_currency(
        &self,
        country: Option<&str>,
        base: &CurrencyCode,
    ) -> CurrencyCode {
        self.currency
            .clone()
            .or_else(|| {
                country
                    .and_then(|c| find_office(&self.offices, c))
                    .map(|office| office.currency.clone())
            })
            .unwrap_or_else(|| base.clone())
    }

    /// Query `repo` and render one report to `sink`.
    pub fn render(
        &self,
        repo: &AssetRepository,
        asset_type: Option<AssetType>,
        country: Option<&str>,
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        let filter = self.filter(asset_type, country);
        let assets = repo.query(&filter, &self.keys, &self.lifecycle);
        debug!(
            matched = assets.len(),
            of = repo.len(),
            "queried assets as of {}",
            self.lifecycle.date()
        );
        let pricing = Pricing {
            table: &self.rates,
            base: repo.base_currency().clone(),
            target: self.target_currency(country, repo.base_currency()),
        };
        Report::new(&self.lifecycle, pricing, self.legend).render(&assets, sink)
    }
}

fn compile(patterns: Option<Vec<String>>, name: &str) -> Result<Vec<Regex>> {
    patterns
        .unwrap_or_default()
        .iter()
        .map(|pattern| {
            Regex::new(pattern)
                .with_context(|| format!("error compiling {name} regex filter"))
        })
        .collect()
}

/// Load the configured asset source into a repository.
pub fn load_repository(opts: &ConfigOpts) -> Result<AssetRepository> {
    let path = opts.inventory.as_ref().and_then(|i| i.path.as_deref());
    let source = source::from_path(path);
    let (repo, summary) = AssetRepository::from_source(source.as_ref())?;
    info!("loaded {} assets from {}", summary.loaded, source.describe());
    if !summary.rejected.is_empty() {
        warn!("skipped {} invalid assets", summary.rejected.len());
    }
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{StyleToken, StyledLine};
    use chrono::{Months, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn opts(report: ConfigOptsReport) -> ConfigOpts {
        ConfigOpts {
            report: Some(ConfigOptsReport {
                as_of: Some(today()),
                ..report
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_expired_laptop() {
        let mut repo = AssetRepository::new(CurrencyCode::USD);
        let purchased = today()
            .checked_sub_months(Months::new(36))
            .unwrap()
            .pred_opt()
            .unwrap();
        repo.add("Dell", "XPS 13", purchased, 1000.0, "laptop", Some("USA"))
            .unwrap();
        repo.add("Apple", "iPhone 12", purchased, 999.0, "phone", Some("USA"))
            .unwrap();
        repo.add("HP", "Spectre", purchased, 1300.0, "laptop", Some("Sweden"))
            .unwrap();

        let settings = ReportSettings::from_opts(&opts(ConfigOptsReport {
            currency: Some("USD".to_string()),
            ..Default::default()
        }))
        .unwrap();
        let mut lines: Vec<StyledLine> = Vec::new();
        settings
            .render(&repo, Some(AssetType::Laptop), Some("USA"), &mut lines)
            .unwrap();

        let rows: Vec<&StyledLine> = lines[2..]
            .iter()
            .take_while(|l| !l.text.is_empty())
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].style, StyleToken::Muted);
        assert!(rows[0].text.contains("Dell"));
        assert!(rows[0].text.contains("1000.00"));
        assert!(rows[0].text.ends_with("expired"));
    }

    #[test]
    fn test_office_currency_is_default_target() {
        let settings =
            ReportSettings::from_opts(&opts(ConfigOptsReport::default()))
                .unwrap();
        let usd = CurrencyCode::USD;
        assert_eq!(settings.target_currency(Some("sweden"), &usd).to_string(), "SEK");
        assert_eq!(settings.target_currency(Some("Mars"), &usd), usd);
        assert_eq!(settings.target_currency(None, &usd), usd);

        let settings = ReportSettings::from_opts(&opts(ConfigOptsReport {
            currency: Some("gbp".to_string()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(settings.target_currency(Some("Sweden"), &usd).to_string(), "GBP");
    }

    #[test]
    fn test_malformed_currency_is_ignored() {
        let settings = ReportSettings::from_opts(&opts(ConfigOptsReport {
            currency: Some("euro".to_string()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(settings.currency, None);
    }

    #[test]
    fn test_bad_settings_are_errors() {
        let bad_regex = opts(ConfigOptsReport {
            include_models: Some(vec!["(".to_string()]),
            ..Default::default()
        });
        assert!(ReportSettings::from_opts(&bad_regex).is_err());

        let bad_sort = opts(ConfigOptsReport {
            sort: Some(vec!["colour".to_string()]),
            ..Default::default()
        });
        assert!(ReportSettings::from_opts(&bad_sort).is_err());
    }

    #[test]
    fn test_custom_bands_win_over_preset() {
        use crate::lifecycle::{StatusTier, TierBand, TierPreset};
        let mut opts = opts(ConfigOptsReport::default());
        opts.lifecycle = Some(ConfigOptsLifecycle {
            tiers: Some(TierPreset::Four),
            bands: Some(vec![
                TierBand::new(StatusTier::Fresh, Some(0), None),
                TierBand::new(StatusTier::Expired, None, Some(-1)),
            ]),
        });
        let settings = ReportSettings::from_opts(&opts).unwrap();
        assert_eq!(settings.lifecycle.table().bands().len(), 2);
    }

    #[test]
    fn test_builtin_inventory_loads() {
        let repo = load_repository(&ConfigOpts::default()).unwrap();
        assert_eq!(repo.len(), 15);
    }
}
