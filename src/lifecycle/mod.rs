//! Asset lifecycle classification.
//!
//! Every asset depreciates over a fixed lifetime of [`LIFETIME_YEARS`]. The
//! number of whole days left until end-of-life is mapped to a [`StatusTier`]
//! through a [`TierTable`] of inclusive day bands.

mod table;
pub use table::*;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The depreciation lifetime of every asset.
pub const LIFETIME_YEARS: u32 = 3;

/// The remaining-life classification of an asset.
///
/// Variants are declared from healthiest to most severe, which is the order
/// used when sorting by status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Fresh,
    Warning,
    Critical,
    Expired,
    /// Purchased after the reporting date.
    Invalid,
}

impl StatusTier {
    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::Fresh => "fresh",
            StatusTier::Warning => "warning",
            StatusTier::Critical => "critical",
            StatusTier::Expired => "expired",
            StatusTier::Invalid => "invalid",
        }
    }
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// The end-of-life date for an asset purchased on `purchased`.
///
/// February 29th purchases end on February 28th.
pub fn end_of_life(purchased: NaiveDate) -> NaiveDate {
    purchased
        .checked_add_months(Months::new(LIFETIME_YEARS * 12))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole days from `today` until the end-of-life of an asset purchased on
/// `purchased`. Negative once end-of-life has passed.
pub fn remaining_days(purchased: NaiveDate, today: NaiveDate) -> i64 {
    (end_of_life(purchased) - today).num_days()
}

/// Classify a purchase date against `today` using `table`.
pub fn classify(
    purchased: NaiveDate,
    today: NaiveDate,
    table: &TierTable,
) -> StatusTier {
    if purchased > today {
        return StatusTier::Invalid;
    }
    table.tier_for(remaining_days(purchased, today))
}

/// A tier table pinned to a reporting date.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    table: TierTable,
    today: NaiveDate,
}

impl Lifecycle {
    pub fn new(table: TierTable, today: NaiveDate) -> Self {
        Self { table, today }
    }

    /// Classify against the local calendar date.
    pub fn today(table: TierTable) -> Self {
        Self::new(table, chrono::Local::now().date_naive())
    }

    pub fn classify(&self, purchased: NaiveDate) -> StatusTier {
        classify(purchased, self.today, &self.table)
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn date(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    /// A purchase date that leaves exactly `days` of lifetime on `today`.
    fn purchased_with(days: i64) -> NaiveDate {
        let eol = today() + Duration::days(days);
        eol.checked_sub_months(Months::new(LIFETIME_YEARS * 12)).unwrap()
    }

    #[test]
    fn test_end_of_life_is_three_calendar_years() {
        assert_eq!(end_of_life(date(2021, 6, 1)), date(2024, 6, 1));
        assert_eq!(end_of_life(date(2020, 2, 29)), date(2023, 2, 28));
    }

    #[test]
    fn test_long_expired_asset() {
        let table = TierTable::default();
        let purchased = today()
            .checked_sub_months(Months::new(36))
            .unwrap()
            - Duration::days(200);
        assert_eq!(classify(purchased, today(), &table), StatusTier::Expired);
    }

    #[test]
    fn test_young_asset_is_fresh() {
        let table = TierTable::default();
        let purchased = today() - Duration::days(100);
        assert_eq!(classify(purchased, today(), &table), StatusTier::Fresh);
    }

    #[test]
    fn test_hundred_days_left_is_warning() {
        let table = TierTable::default();
        let purchased = purchased_with(100);
        assert_eq!(classify(purchased, today(), &table), StatusTier::Warning);
    }

    #[test]
    fn test_boundaries() {
        let table = TierTable::default();
        let cases = [
            (-1, StatusTier::Expired),
            (0, StatusTier::Critical),
            (90, StatusTier::Critical),
            (91, StatusTier::Warning),
            (180, StatusTier::Warning),
            (181, StatusTier::Fresh),
        ];
        for (days, expected) in cases {
            let purchased = purchased_with(days);
            assert_eq!(remaining_days(purchased, today()), days);
            assert_eq!(
                classify(purchased, today(), &table),
                expected,
                "{days} days remaining"
            );
        }
    }

    #[test]
    fn test_future_purchase_is_invalid() {
        let lifecycle = Lifecycle::new(TierTable::default(), today());
        assert_eq!(
            lifecycle.classify(today() + Duration::days(1)),
            StatusTier::Invalid
        );
        assert_eq!(lifecycle.classify(today()), StatusTier::Fresh);
    }

    #[test]
    fn test_three_tier_coalesces_warning() {
        let table = TierTable::preset(TierPreset::Three);
        assert_eq!(classify(purchased_with(150), today(), &table), StatusTier::Fresh);
        assert_eq!(classify(purchased_with(90), today(), &table), StatusTier::Critical);
        assert_eq!(classify(purchased_with(-5), today(), &table), StatusTier::Expired);
    }

    #[test]
    fn test_two_tier() {
        let table = TierTable::preset(TierPreset::Two);
        assert_eq!(classify(purchased_with(0), today(), &table), StatusTier::Fresh);
        assert_eq!(classify(purchased_with(-1), today(), &table), StatusTier::Expired);
    }

    #[test]
    fn test_severity_order() {
        let mut tiers = vec![
            StatusTier::Invalid,
            StatusTier::Critical,
            StatusTier::Fresh,
            StatusTier::Expired,
            StatusTier::Warning,
        ];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![
                StatusTier::Fresh,
                StatusTier::Warning,
                StatusTier::Critical,
                StatusTier::Expired,
                StatusTier::Invalid,
            ]
        );
    }
}
