use crate::currency::CurrencyCode;
use crate::lifecycle;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kinds of hardware being tracked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Laptops and desktop computers.
    #[value(alias = "computer")]
    #[serde(alias = "computer")]
    Laptop,
    /// Mobile phones.
    #[value(alias = "mobile")]
    #[serde(alias = "mobile")]
    Phone,
}

impl AssetType {
    pub const ALL: [AssetType; 2] = [AssetType::Laptop, AssetType::Phone];

    pub fn label(&self) -> &'static str {
        match self {
            AssetType::Laptop => "Laptop",
            AssetType::Phone => "Phone",
        }
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "laptop" | "computer" => Ok(AssetType::Laptop),
            "phone" | "mobile" => Ok(AssetType::Phone),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A tracked hardware asset. Prices are in the repository's base currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub(super) asset_type: AssetType,
    pub(super) brand: String,
    pub(super) model: String,
    pub(super) price: f64,
    pub(super) purchased: NaiveDate,
    pub(super) country: Option<String>,
}

impl Asset {
    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn purchased(&self) -> NaiveDate {
        self.purchased
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn end_of_life(&self) -> NaiveDate {
        lifecycle::end_of_life(self.purchased)
    }
}

/// An unvalidated asset, as read from an inventory source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub purchased: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<&Asset> for AssetRecord {
    fn from(asset: &Asset) -> Self {
        Self {
            asset_type: asset.asset_type.to_string().to_lowercase(),
            brand: asset.brand.clone(),
            model: asset.model.clone(),
            price: asset.price,
            purchased: asset.purchased,
            country: asset.country.clone(),
        }
    }
}

/// The model of an inventory file.
///
/// ```yaml
/// base_currency: USD
/// assets:
///   - type: laptop
///     brand: Dell
///     model: XPS 13
///     price: 1200
///     purchased: 2019-10-15
///     country: USA
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryData {
    #[serde(default = "default_base_currency")]
    pub base_currency: CurrencyCode,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

fn default_base_currency() -> CurrencyCode {
    CurrencyCode::USD
}
