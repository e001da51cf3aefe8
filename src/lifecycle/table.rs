use crate::lifecycle::StatusTier;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("a tier table needs at least one band")]
    Empty,
    #[error("band '{0}' has a minimum above its maximum")]
    Inverted(StatusTier),
    #[error("bands '{0}' and '{1}' overlap")]
    Overlap(StatusTier, StatusTier),
    #[error("the invalid tier is reserved for future purchase dates")]
    Reserved,
}

/// An inclusive range of remaining days mapped to a tier.
///
/// A missing bound is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBand {
    pub tier: StatusTier,
    #[serde(default)]
    pub min_days: Option<i64>,
    #[serde(default)]
    pub max_days: Option<i64>,
}

impl TierBand {
    pub fn new(
        tier: StatusTier,
        min_days: Option<i64>,
        max_days: Option<i64>,
    ) -> Self {
        Self {
            tier,
            min_days,
            max_days,
        }
    }

    pub fn contains(&self, days: i64) -> bool {
        self.min_days.map_or(true, |min| days >= min)
            && self.max_days.map_or(true, |max| days <= max)
    }

    fn lower(&self) -> i64 {
        self.min_days.unwrap_or(i64::MIN)
    }

    fn upper(&self) -> i64 {
        self.max_days.unwrap_or(i64::MAX)
    }
}

impl fmt::Display for TierBand {
    /// Describe the band in words, as shown in the report legend.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_days, self.max_days) {
            (None, None) => write!(f, "any remaining lifetime"),
            (Some(min), None) if min <= 0 => write!(f, "within lifetime"),
            (Some(min), None) => {
                write!(f, "more than {} days of lifetime left", min - 1)
            }
            (None, Some(max)) if max < 0 => write!(f, "past end of life"),
            (None, Some(max)) => write!(f, "at most {max} days left"),
            (Some(min), Some(max)) => {
                write!(f, "{min} to {max} days of lifetime left")
            }
        }
    }
}

/// Built-in tier tables.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TierPreset {
    /// Fresh, warning, critical and expired.
    #[default]
    Four,
    /// Fresh, critical and expired.
    Three,
    /// Fresh and expired.
    Two,
}

/// A validated list of non-overlapping tier bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    bands: Vec<TierBand>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self::preset(TierPreset::default())
    }
}

impl TierTable {
    /// Build a table, ordered from most remaining days to least.
    pub fn new(mut bands: Vec<TierBand>) -> Result<Self, LifecycleError> {
        if bands.is_empty() {
            return Err(LifecycleError::Empty);
        }
        for band in &bands {
            if band.tier == StatusTier::Invalid {
                return Err(LifecycleError::Reserved);
            }
            if band.lower() > band.upper() {
                return Err(LifecycleError::Inverted(band.tier));
            }
        }
        bands.sort_by(|a, b| b.upper().cmp(&a.upper()));
        for pair in bands.windows(2) {
            if let [higher, lower] = pair {
                if lower.upper() >= higher.lower() {
                    return Err(LifecycleError::Overlap(higher.tier, lower.tier));
                }
            }
        }
        Ok(Self { bands })
    }

    pub fn preset(preset: TierPreset) -> Self {
        use StatusTier::*;
        let bands = match preset {
            TierPreset::Four => vec![
                TierBand::new(Fresh, Some(181), None),
                TierBand::new(Warning, Some(91), Some(180)),
                TierBand::new(Critical, Some(0), Some(90)),
                TierBand::new(Expired, None, Some(-1)),
            ],
            TierPreset::Three => vec![
                TierBand::new(Fresh, Some(91), None),
                TierBand::new(Critical, Some(0), Some(90)),
                TierBand::new(Expired, None, Some(-1)),
            ],
            TierPreset::Two => vec![
                TierBand::new(Fresh, Some(0), None),
                TierBand::new(Expired, None, Some(-1)),
            ],
        };
        Self { bands }
    }

    /// The tier for `days` of remaining lifetime. Gaps between bands count
    /// as expired.
    pub fn tier_for(&self, days: i64) -> StatusTier {
        self.bands
            .iter()
            .find(|band| band.contains(days))
            .map(|band| band.tier)
            .unwrap_or(StatusTier::Expired)
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    pub fn band(&self, tier: StatusTier) -> Option<&TierBand> {
        self.bands.iter().find(|band| band.tier == tier)
    }
}
