use crate::inventory::models::{Asset, AssetRecord, AssetType};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("unknown asset type '{0}', expected laptop or phone")]
    UnknownAssetType(String),
    #[error("price {0} is negative")]
    NegativePrice(f64),
    #[error("price is not a finite number")]
    NonFinitePrice,
}

/// A builder for asset models.
#[derive(Default)]
pub struct AssetBuilder {
    asset_type: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    price: Option<f64>,
    purchased: Option<NaiveDate>,
    country: Option<String>,
}

impl AssetBuilder {
    /// Create a new asset builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize the asset type from its name.
    pub fn asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type.replace(asset_type.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand.replace(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model.replace(model.into());
        self
    }

    /// Initialize the price, in the base currency.
    pub fn price(mut self, price: f64) -> Self {
        self.price.replace(price);
        self
    }

    pub fn purchased(mut self, date: NaiveDate) -> Self {
        self.purchased.replace(date);
        self
    }

    /// Initialize the office country. Blank labels are treated as absent.
    pub fn country(mut self, country: Option<impl Into<String>>) -> Self {
        self.country = country
            .map(Into::into)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    /// Validate and build an asset model.
    pub fn build(self) -> Result<Asset, ValidationError> {
        let asset_type = self
            .asset_type
            .ok_or(ValidationError::MissingField("asset type"))?;
        let asset_type = asset_type
            .parse::<AssetType>()
            .map_err(ValidationError::UnknownAssetType)?;
        let brand = non_empty(self.brand, "brand")?;
        let model = non_empty(self.model, "model")?;
        let price = self.price.ok_or(ValidationError::MissingField("price"))?;
        if !price.is_finite() {
            return Err(ValidationError::NonFinitePrice);
        }
        if price < 0.0 {
            return Err(ValidationError::NegativePrice(price));
        }
        let purchased = self
            .purchased
            .ok_or(ValidationError::MissingField("purchase date"))?;

        Ok(Asset {
            asset_type,
            brand,
            model,
            // -0.0 becomes 0.0
            price: price + 0.0,
            purchased,
            country: self.country,
        })
    }
}

fn non_empty(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

impl From<AssetRecord> for AssetBuilder {
    fn from(record: AssetRecord) -> Self {
        AssetBuilder::new()
            .asset_type(record.asset_type)
            .brand(record.brand)
            .model(record.model)
            .price(record.price)
            .purchased(record.purchased)
            .country(record.country)
    }
}

impl TryFrom<AssetRecord> for Asset {
    type Error = ValidationError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        AssetBuilder::from(record).build()
    }
}
