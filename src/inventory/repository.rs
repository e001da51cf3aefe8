use crate::currency::CurrencyCode;
use crate::inventory::{
    builder::{AssetBuilder, ValidationError},
    models::{Asset, AssetRecord, InventoryData},
    query::{AssetFilter, SortKey},
    source::AssetSource,
};
use crate::lifecycle::Lifecycle;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// The outcome of loading an asset source.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadSummary {
    pub loaded: usize,
    /// Index into the source and the reason each rejected record was skipped.
    pub rejected: Vec<(usize, AssetRecord, ValidationError)>,
}

/// An in-memory collection of assets priced in a single base currency.
///
/// Assets keep their insertion order and are never mutated once added.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    base_currency: CurrencyCode,
    assets: Vec<Asset>,
}

impl AssetRepository {
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            assets: Vec::new(),
        }
    }

    /// Build a repository from everything an asset source provides.
    pub fn from_source(source: &dyn AssetSource) -> Result<(Self, LoadSummary)> {
        let data = source.load()?;
        let mut repo = Self::new(data.base_currency.clone());
        let summary = repo.load(data);
        Ok((repo, summary))
    }

    /// Add every valid record, skipping invalid ones.
    pub fn load(&mut self, data: InventoryData) -> LoadSummary {
        let mut summary = LoadSummary::default();
        for (idx, record) in data.assets.into_iter().enumerate() {
            match self.insert(record.clone()) {
                Ok(_) => summary.loaded += 1,
                Err(err) => {
                    warn!(
                        "skipping asset #{} ({} {}): {}",
                        idx + 1,
                        record.brand,
                        record.model,
                        err
                    );
                    summary.rejected.push((idx, record, err));
                }
            }
        }
        debug!(
            loaded = summary.loaded,
            rejected = summary.rejected.len(),
            "loaded assets"
        );
        summary
    }

    /// Validate and append a new asset.
    pub fn add(
        &mut self,
        brand: &str,
        model: &str,
        purchased: NaiveDate,
        price: f64,
        asset_type: &str,
        country: Option<&str>,
    ) -> Result<&Asset, ValidationError> {
        let asset = AssetBuilder::new()
            .asset_type(asset_type)
            .brand(brand)
            .model(model)
            .purchased(purchased)
            .price(price)
            .country(country)
            .build()?;
        Ok(self.push(asset))
    }

    /// Validate and append an asset record.
    pub fn insert(
        &mut self,
        record: AssetRecord,
    ) -> Result<&Asset, ValidationError> {
        let asset = Asset::try_from(record)?;
        Ok(self.push(asset))
    }

    fn push(&mut self, asset: Asset) -> &Asset {
        self.assets.push(asset);
        let idx = self.assets.len() - 1;
        &self.assets[idx]
    }

    /// Assets matching `filter`, ordered by `keys`.
    ///
    /// Keys are compared in order; assets equal on every key keep their
    /// insertion order.
    pub fn query(
        &self,
        filter: &AssetFilter,
        keys: &[SortKey],
        lifecycle: &Lifecycle,
    ) -> Vec<&Asset> {
        let mut matches: Vec<&Asset> =
            self.assets.iter().filter(|a| filter.matches(a)).collect();
        // `sort_by` is stable.
        matches.sort_by(|a, b| {
            keys.iter()
                .map(|key| key.compare(a, b, lifecycle))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }

    /// Export the repository in the inventory file model.
    pub fn to_data(&self) -> InventoryData {
        InventoryData {
            base_currency: self.base_currency.clone(),
            assets: self.assets.iter().map(AssetRecord::from).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AssetRepository {
    type Item = &'a Asset;
    type IntoIter = std::slice::Iter<'a, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{models::AssetType, query::SortField};
    use crate::lifecycle::TierTable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lifecycle() -> Lifecycle {
        Lifecycle::new(TierTable::default(), date(2024, 6, 1))
    }

    fn repo() -> AssetRepository {
        let mut repo = AssetRepository::new(CurrencyCode::USD);
        repo.add("Dell", "XPS 13", date(2021, 1, 1), 1200.0, "laptop", Some("USA"))
            .unwrap();
        repo.add("Apple", "iPhone 12", date(2023, 1, 1), 999.0, "phone", Some("Germany"))
            .unwrap();
        repo.add("HP", "Spectre", date(2021, 1, 1), 1300.0, "laptop", Some("USA"))
            .unwrap();
        repo.add("Asus", "ZenBook", date(2023, 5, 1), 1400.0, "laptop", None)
            .unwrap();
        repo
    }

    fn brands(assets: &[&Asset]) -> Vec<String> {
        assets.iter().map(|a| a.brand().to_string()).collect()
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut repo = AssetRepository::new(CurrencyCode::USD);
        let err = repo
            .add("Dell", "XPS", date(2021, 1, 1), -5.0, "laptop", None)
            .unwrap_err();
        assert_eq!(err, ValidationError::NegativePrice(-5.0));
        let err = repo
            .add("Dell", "XPS", date(2021, 1, 1), 5.0, "tablet", None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownAssetType(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_duplicates_permitted() {
        let mut repo = AssetRepository::new(CurrencyCode::USD);
        for _ in 0..2 {
            repo.add("Dell", "XPS", date(2021, 1, 1), 5.0, "laptop", None)
                .unwrap();
        }
        assert_eq!(repo.len(), 2);
        let all: Vec<_> = repo.iter().collect();
        assert_eq!(all[0], all[1]);
    }

    #[test]
    fn test_query_filters() {
        let repo = repo();
        let filter = AssetFilter::all()
            .asset_type(Some(AssetType::Laptop))
            .country(Some("USA"));
        let found = repo.query(&filter, &[], &lifecycle());
        assert_eq!(brands(&found), vec!["Dell", "HP"]);
    }

    #[test]
    fn test_query_no_match_is_empty() {
        let repo = repo();
        let filter = AssetFilter::all().country(Some("Atlantis"));
        assert!(repo.query(&filter, &SortKey::defaults(), &lifecycle()).is_empty());
    }

    #[test]
    fn test_sort_is_stable() {
        let repo = repo();
        // Dell and HP tie on type and date.
        let keys = [SortKey::asc(SortField::Type), SortKey::asc(SortField::Date)];
        let found = repo.query(&AssetFilter::all(), &keys, &lifecycle());
        assert_eq!(brands(&found), vec!["Dell", "HP", "Asus", "Apple"]);

        let keys = [SortKey::desc(SortField::Date)];
        let found = repo.query(&AssetFilter::all(), &keys, &lifecycle());
        assert_eq!(brands(&found), vec!["Asus", "Apple", "Dell", "HP"]);
    }

    #[test]
    fn test_sort_by_later_keys_on_ties() {
        let repo = repo();
        let keys = [SortKey::asc(SortField::Type), SortKey::desc(SortField::Price)];
        let found = repo.query(&AssetFilter::all(), &keys, &lifecycle());
        assert_eq!(brands(&found), vec!["Asus", "HP", "Dell", "Apple"]);
    }

    #[test]
    fn test_sort_by_status() {
        let repo = repo();
        // 2021 laptops expired on 2024-01-01, the rest are fresh.
        let keys = [SortKey::desc(SortField::Status)];
        let found = repo.query(&AssetFilter::all(), &keys, &lifecycle());
        assert_eq!(brands(&found), vec!["Dell", "HP", "Apple", "Asus"]);
    }

    #[test]
    fn test_load_skips_invalid_records() {
        let mut data = repo().to_data();
        data.assets[1].price = -1.0;
        data.assets[2].asset_type = "tablet".to_string();
        let mut fresh = AssetRepository::new(CurrencyCode::USD);
        let summary = fresh.load(data);
        assert_eq!(summary.loaded, 2);
        let skipped: Vec<_> =
            summary.rejected.iter().map(|(idx, _, _)| *idx).collect();
        assert_eq!(skipped, vec![1, 2]);
        assert_eq!(brands(&fresh.iter().collect::<Vec<_>>()), vec!["Dell", "Asus"]);
    }
}
