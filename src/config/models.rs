use crate::config::default_config_path;
use crate::inventory::AssetType;
use crate::lifecycle::{TierBand, TierPreset};
use crate::report::{ColorMode, LegendMode};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::debug;

/// A model of all potential configuration options for the atrack CLI system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOpts {
    pub report: Option<ConfigOptsReport>,
    pub inventory: Option<ConfigOptsInventory>,
    pub lifecycle: Option<ConfigOptsLifecycle>,
    /// Extra or replacement conversion rates, relative to USD.
    pub rates: Option<BTreeMap<String, f64>>,
}

impl ConfigOpts {
    /// Read runtime config from a target path.
    ///
    /// A missing file at the default location is not an error.
    pub fn from_file(path: Option<PathBuf>) -> Result<Self> {
        let explicit = path.is_some();
        let mut atrack_toml_path = match path {
            Some(path) => path,
            None => default_config_path(),
        };
        if !atrack_toml_path.exists() {
            anyhow::ensure!(
                !explicit,
                "config file {:?} does not exist",
                atrack_toml_path
            );
            debug!("no config file at {:?}", atrack_toml_path);
            return Ok(Default::default());
        }
        if !atrack_toml_path.is_absolute() {
            atrack_toml_path =
                atrack_toml_path.canonicalize().with_context(|| {
                    format!(
                        "could not canonicalize path to config file {:?}",
                        &atrack_toml_path
                    )
                })?;
        }
        debug!("reading config file {:?}", atrack_toml_path);
        let cfg_bytes =
            std::fs::read(&atrack_toml_path).context("reading config file")?;
        let cfg: Self = toml::from_slice(&cfg_bytes)
            .context("reading config file contents as TOML data")?;
        Ok(cfg)
    }

    /// Read runtime config from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(ConfigOpts {
            report: Some(
                envy::prefixed("ATRACK_REPORT_")
                    .from_env::<ConfigOptsReport>()
                    .context("reading report env var config")?,
            ),
            inventory: Some(
                envy::prefixed("ATRACK_INVENTORY_")
                    .from_env::<ConfigOptsInventory>()
                    .context("reading inventory env var config")?,
            ),
            lifecycle: Some(
                envy::prefixed("ATRACK_LIFECYCLE_")
                    .from_env::<ConfigOptsLifecycle>()
                    .context("reading lifecycle env var config")?,
            ),
            rates: None,
        })
    }

    /// Read the file and environment layers, then apply `cli` on top.
    pub fn full(path: Option<PathBuf>, cli: Option<ConfigOpts>) -> Result<Self> {
        let toml_cfg = Self::from_file(path)?;
        let env_cfg = Self::from_env()?;
        let opts = toml_cfg.merge(env_cfg);
        Ok(match cli {
            Some(cli_cfg) => opts.merge(cli_cfg),
            None => opts,
        })
    }

    /// Merge config layers, where the `greater` layer takes precedence.
    pub fn merge(mut self, mut greater: Self) -> Self {
        greater.report = match (self.report.take(), greater.report.take()) {
            (None, None) => None,
            (Some(val), None) | (None, Some(val)) => Some(val),
            (Some(l), Some(mut g)) => {
                g.currency = g.currency.or(l.currency);
                g.country = g.country.or(l.country);
                g.asset_type = g.asset_type.or(l.asset_type);
                g.sort = g.sort.or(l.sort);
                g.legend = g.legend.or(l.legend);
                g.color = g.color.or(l.color);
                g.as_of = g.as_of.or(l.as_of);
                g.include_models = g.include_models.or(l.include_models);
                g.ignore_models = g.ignore_models.or(l.ignore_models);
                Some(g)
            }
        };
        greater.inventory =
            match (self.inventory.take(), greater.inventory.take()) {
                (None, None) => None,
                (Some(val), None) | (None, Some(val)) => Some(val),
                (Some(l), Some(mut g)) => {
                    g.path = g.path.or(l.path);
                    Some(g)
                }
            };
        greater.lifecycle =
            match (self.lifecycle.take(), greater.lifecycle.take()) {
                (None, None) => None,
                (Some(val), None) | (None, Some(val)) => Some(val),
                (Some(l), Some(mut g)) => {
                    g.tiers = g.tiers.or(l.tiers);
                    g.bands = g.bands.or(l.bands);
                    Some(g)
                }
            };
        greater.rates = match (self.rates.take(), greater.rates.take()) {
            (None, None) => None,
            (Some(val), None) | (None, Some(val)) => Some(val),
            (Some(mut l), Some(g)) => {
                l.extend(g);
                Some(l)
            }
        };
        greater
    }
}

/// Config options for the report system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Args)]
pub struct ConfigOptsReport {
    /// Show prices in this currency [default: the office currency]
    #[clap(long, value_name = "code")]
    pub currency: Option<String>,
    /// Only list assets held by this country's office [default: all]
    #[clap(long, value_name = "country")]
    pub country: Option<String>,
    /// Only list assets of this type [default: all]
    #[clap(short = 't', long, value_name = "type")]
    pub asset_type: Option<AssetType>,
    /// Sort keys, e.g. `type,status,date:desc`
    #[clap(long, value_name = "key[:asc|:desc]", value_delimiter = ',')]
    pub sort: Option<Vec<String>>,
    /// Which tiers the legend lists [default: all]
    #[clap(long, value_name = "mode")]
    pub legend: Option<LegendMode>,
    /// When to color output [default: auto]
    #[clap(long, value_name = "when")]
    pub color: Option<ColorMode>,
    /// The date lifetimes are measured against [default: today]
    #[clap(long, value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,
    /// Include assets whose brand or model matches a regex [default: all]
    #[clap(long, value_name = "pattern")]
    pub include_models: Option<Vec<String>>,
    /// Ignore assets whose brand or model matches a regex [default: none]
    #[clap(long, value_name = "pattern")]
    pub ignore_models: Option<Vec<String>>,
}

/// Config options for the inventory system.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Args)]
pub struct ConfigOptsInventory {
    /// The path to an inventory file [default: built-in sample inventory]
    #[clap(short = 'i', long = "inventory", value_name = "file")]
    pub path: Option<PathBuf>,
}

/// Config options for lifecycle classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Args)]
pub struct ConfigOptsLifecycle {
    /// The built-in tier table to classify with [default: four]
    #[clap(long, value_name = "preset")]
    pub tiers: Option<TierPreset>,
    /// Custom tier bands, which take precedence over `tiers`.
    #[clap(skip)]
    pub bands: Option<Vec<TierBand>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_merge_precedence() {
        let file = ConfigOpts {
            report: Some(ConfigOptsReport {
                currency: Some("SEK".to_string()),
                country: Some("Sweden".to_string()),
                ..Default::default()
            }),
            rates: Some([("NOK".to_string(), 10.0)].into()),
            ..Default::default()
        };
        let env = ConfigOpts {
            report: Some(ConfigOptsReport {
                currency: Some("EUR".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cli = ConfigOpts {
            report: Some(ConfigOptsReport {
                asset_type: Some(AssetType::Phone),
                ..Default::default()
            }),
            inventory: Some(ConfigOptsInventory {
                path: Some("assets.yaml".into()),
            }),
            ..Default::default()
        };
        let opts = file.merge(env).merge(cli);
        let report = opts.report.unwrap();
        assert_eq!(report.currency.as_deref(), Some("EUR"));
        assert_eq!(report.country.as_deref(), Some("Sweden"));
        assert_eq!(report.asset_type, Some(AssetType::Phone));
        assert_eq!(opts.inventory.unwrap().path, Some("assets.yaml".into()));
        assert_eq!(opts.rates.unwrap()["NOK"], 10.0);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[report]
currency = "gbp"
sort = ["brand", "price:desc"]
legend = "in-use"
as_of = "2024-01-31"

[lifecycle]
tiers = "three"
bands = [
    {{ tier = "fresh", min_days = 0 }},
    {{ tier = "expired", max_days = -1 }},
]

[rates]
NOK = 10.5
"#
        )
        .unwrap();
        let opts = ConfigOpts::from_file(Some(file.path().to_owned())).unwrap();
        let report = opts.report.unwrap();
        assert_eq!(report.currency.as_deref(), Some("gbp"));
        assert_eq!(
            report.sort,
            Some(vec!["brand".to_string(), "price:desc".to_string()])
        );
        assert_eq!(report.legend, Some(LegendMode::InUse));
        assert_eq!(report.as_of, NaiveDate::from_ymd_opt(2024, 1, 31));
        let lifecycle = opts.lifecycle.unwrap();
        assert_eq!(lifecycle.tiers, Some(TierPreset::Three));
        assert_eq!(lifecycle.bands.unwrap().len(), 2);
        assert_eq!(opts.rates.unwrap()["NOK"], 10.5);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("ATRACK_LIFECYCLE_TIERS", "two");
        let opts = ConfigOpts::from_env().unwrap();
        std::env::remove_var("ATRACK_LIFECYCLE_TIERS");
        assert_eq!(opts.lifecycle.unwrap().tiers, Some(TierPreset::Two));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/atrack.toml");
        assert!(ConfigOpts::from_file(Some(path)).is_err());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[report\ncurrency = ").unwrap();
        let err = ConfigOpts::from_file(Some(file.path().to_owned())).unwrap_err();
        assert!(format!("{err:#}").contains("TOML"));
    }
}
