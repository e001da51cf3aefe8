use crate::currency::CurrencyCode;
use crate::inventory::models::{AssetRecord, InventoryData};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything assets can be loaded from.
pub trait AssetSource {
    fn load(&self) -> Result<InventoryData>;

    /// A short human readable name for logs.
    fn describe(&self) -> String;
}

/// The sample inventory compiled into the binary, priced in USD.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSeed;

const SEED: [(&str, &str, &str, f64, (i32, u32, u32), &str); 15] = [
    ("laptop", "Dell", "XPS 13", 1200.0, (2019, 10, 15), "USA"),
    ("phone", "Samsung", "Galaxy S10", 800.0, (2019, 8, 1), "Germany"),
    ("laptop", "HP", "Spectre x360", 1300.0, (2021, 6, 1), "USA"),
    ("phone", "Apple", "iPhone 12", 999.0, (2021, 11, 15), "Germany"),
    ("laptop", "Apple", "MacBook Pro", 2400.0, (2022, 5, 10), "Germany"),
    ("phone", "Google", "Pixel 5", 699.0, (2022, 3, 15), "United Kingdom"),
    ("laptop", "Lenovo", "ThinkPad X1", 1500.0, (2023, 1, 20), "Germany"),
    ("phone", "OnePlus", "OnePlus 9", 799.0, (2023, 4, 25), "United Kingdom"),
    ("laptop", "Asus", "ZenBook", 1400.0, (2022, 7, 20), "USA"),
    ("phone", "Xiaomi", "Mi 11", 749.0, (2022, 10, 1), "Germany"),
    ("phone", "Sony", "Xperia 5", 899.0, (2023, 2, 5), "United Kingdom"),
    ("laptop", "Razer", "Blade 15", 2500.0, (2023, 3, 12), "USA"),
    ("phone", "Nokia", "G50", 299.0, (2021, 5, 1), "United Kingdom"),
    ("laptop", "Acer", "Aspire 5", 600.0, (2023, 5, 10), "Sweden"),
    ("phone", "Huawei", "P30", 599.0, (2021, 4, 20), "Sweden"),
];

impl AssetSource for BuiltinSeed {
    fn load(&self) -> Result<InventoryData> {
        let assets = SEED
            .iter()
            .map(|(asset_type, brand, model, price, (y, m, d), country)| {
                Ok(AssetRecord {
                    asset_type: asset_type.to_string(),
                    brand: brand.to_string(),
                    model: model.to_string(),
                    price: *price,
                    purchased: NaiveDate::from_ymd_opt(*y, *m, *d)
                        .with_context(|| {
                            format!("invalid seed date for {brand} {model}")
                        })?,
                    country: Some(country.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(InventoryData {
            base_currency: CurrencyCode::USD,
            assets,
        })
    }

    fn describe(&self) -> String {
        "built-in sample inventory".to_string()
    }
}

/// An inventory file in YAML, or JSON when the extension is `.json`.
#[derive(Debug, Clone)]
pub struct InventoryFile {
    path: PathBuf,
}

impl InventoryFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
    }

    /// Parse inventory data from bytes in this file's format.
    pub fn parse(&self, bytes: &[u8]) -> Result<InventoryData> {
        if self.is_json() {
            serde_json::from_slice(bytes)
                .context("deserializing inventory from JSON")
        } else {
            serde_yaml::from_slice(bytes)
                .context("deserializing inventory from YAML")
        }
    }
}

impl AssetSource for InventoryFile {
    fn load(&self) -> Result<InventoryData> {
        debug!("reading inventory file {}", self.path.display());
        let bytes = std::fs::read(&self.path).with_context(|| {
            format!("reading inventory file '{}'", self.path.display())
        })?;
        self.parse(&bytes).with_context(|| {
            format!("parsing inventory file '{}'", self.path.display())
        })
    }

    fn describe(&self) -> String {
        format!("inventory file '{}'", self.path.display())
    }
}

/// The source configured by an optional inventory path.
pub fn from_path(path: Option<&Path>) -> Box<dyn AssetSource> {
    match path {
        Some(path) => Box::new(InventoryFile::new(path)),
        None => Box::new(BuiltinSeed),
    }
}
