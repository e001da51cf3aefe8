//! Asset report rendering.
//!
//! A report is a header, one row per asset colored by its status tier, and a
//! legend explaining the colors. Lines are handed to a [`ReportSink`] along
//! with a [`StyleToken`]; the sink decides how to present them.

mod sink;
pub use sink::*;

mod style;
pub use style::*;

use crate::currency::{self, CurrencyCode, CurrencyError, RateTable};
use crate::inventory::Asset;
use crate::lifecycle::{Lifecycle, StatusTier};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

const TYPE_WIDTH: usize = 12;
const BRAND_WIDTH: usize = 15;
const MODEL_WIDTH: usize = 20;
const PRICE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 10;

/// Which tiers the legend lists.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum LegendMode {
    /// Every tier of the active tier table.
    #[default]
    All,
    /// Only tiers that appear in the report.
    InUse,
}

/// How asset prices are shown.
#[derive(Debug, Clone)]
pub struct Pricing<'a> {
    pub table: &'a RateTable,
    /// The currency asset prices are stored in.
    pub base: CurrencyCode,
    /// The currency to show prices in.
    pub target: CurrencyCode,
}

impl<'a> Pricing<'a> {
    /// The factor applied to base prices.
    fn factor(&self) -> Result<f64, CurrencyError> {
        currency::convert(1.0, &self.base, &self.target, self.table)
    }
}

/// One rendered asset row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub tier: StatusTier,
    pub text: String,
}

/// A report over classified, priced assets.
pub struct Report<'a> {
    lifecycle: &'a Lifecycle,
    pricing: Pricing<'a>,
    legend: LegendMode,
}

impl<'a> Report<'a> {
    pub fn new(
        lifecycle: &'a Lifecycle,
        pricing: Pricing<'a>,
        legend: LegendMode,
    ) -> Self {
        Self {
            lifecycle,
            pricing,
            legend,
        }
    }

    /// Classify and format each asset, in the given order.
    ///
    /// Prices stay unconverted when the target currency is unknown.
    pub fn rows(&self, assets: &[&Asset]) -> Vec<ReportRow> {
        let factor = self.pricing.factor().unwrap_or(1.0);
        assets
            .iter()
            .map(|asset| self.row(asset, factor))
            .collect()
    }

    fn row(&self, asset: &Asset, factor: f64) -> ReportRow {
        let tier = self.lifecycle.classify(asset.purchased());
        let price = asset.price() * factor;
        let text = format!(
            "{:<tw$} {:<bw$} {:<mw$} {:>pw$.2}  {:<dw$}  {}",
            asset.asset_type().label(),
            clip(asset.brand(), BRAND_WIDTH),
            clip(asset.model(), MODEL_WIDTH),
            price,
            asset.purchased().format("%Y-%m-%d").to_string(),
            tier.label(),
            tw = TYPE_WIDTH,
            bw = BRAND_WIDTH,
            mw = MODEL_WIDTH,
            pw = PRICE_WIDTH,
            dw = DATE_WIDTH,
        );
        ReportRow { tier, text }
    }

    fn header(currency: &CurrencyCode) -> String {
        format!(
            "{:<tw$} {:<bw$} {:<mw$} {:>pw$}  {:<dw$}  {}",
            "Type",
            "Brand",
            "Model",
            format!("Price {currency}"),
            "Purchased",
            "Status",
            tw = TYPE_WIDTH,
            bw = BRAND_WIDTH,
            mw = MODEL_WIDTH,
            pw = PRICE_WIDTH,
            dw = DATE_WIDTH,
        )
    }

    /// The tiers the legend explains, in severity order.
    fn legend_tiers(&self, rows: &[ReportRow]) -> Vec<StatusTier> {
        let in_use: BTreeSet<StatusTier> = rows.iter().map(|r| r.tier).collect();
        match self.legend {
            LegendMode::InUse => in_use.into_iter().collect(),
            LegendMode::All => {
                let mut tiers: BTreeSet<StatusTier> = self
                    .lifecycle
                    .table()
                    .bands()
                    .iter()
                    .map(|band| band.tier)
                    .collect();
                if in_use.contains(&StatusTier::Invalid) {
                    tiers.insert(StatusTier::Invalid);
                }
                tiers.into_iter().collect()
            }
        }
    }

    fn describe(&self, tier: StatusTier) -> String {
        match tier {
            StatusTier::Invalid => "purchase date in the future".to_string(),
            tier => self
                .lifecycle
                .table()
                .band(tier)
                .map(ToString::to_string)
                .unwrap_or_else(|| "outside every band".to_string()),
        }
    }

    /// Write the header, rows and legend to `sink`.
    pub fn render(
        &self,
        assets: &[&Asset],
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        let currency = match self.pricing.factor() {
            Ok(_) => &self.pricing.target,
            Err(err) => {
                warn!("{err}, showing prices in {}", self.pricing.base);
                &self.pricing.base
            }
        };
        let rows = self.rows(assets);

        let header = Self::header(currency);
        emit(sink, StyleToken::Header, &header)?;
        emit(sink, StyleToken::Plain, &"-".repeat(header.len()))?;
        for row in &rows {
            emit(sink, row.tier.style(), &row.text)?;
        }

        emit(sink, StyleToken::Plain, "")?;
        emit(sink, StyleToken::Header, "Legend")?;
        for tier in self.legend_tiers(&rows) {
            let line = format!("  {:<10} {}", tier.label(), self.describe(tier));
            emit(sink, tier.style(), &line)?;
        }
        Ok(())
    }
}

fn emit(sink: &mut dyn ReportSink, style: StyleToken, text: &str) -> Result<()> {
    sink.line(style, text).context("writing report")
}

/// Shorten `text` to `width` characters so columns stay aligned.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width - 1).collect();
        clipped.push('…');
        clipped
    }
}
