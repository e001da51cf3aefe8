use crate::inventory::models::{Asset, AssetType};
use crate::lifecycle::Lifecycle;
use regex::Regex;
use std::{cmp::Ordering, fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(
        "unknown sort field '{0}', expected one of: {names}",
        names = SortField::NAMES.join(", ")
    )]
    UnknownField(String),
    #[error("unknown sort direction '{0}', expected asc or desc")]
    UnknownDirection(String),
}

/// A predicate over assets.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub asset_type: Option<AssetType>,
    pub country: Option<String>,
    /// Keep assets whose brand or model matches every pattern.
    pub include: Vec<Regex>,
    /// Drop assets whose brand or model matches any pattern.
    pub ignore: Vec<Regex>,
}

impl AssetFilter {
    /// A filter matching everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn asset_type(mut self, asset_type: Option<AssetType>) -> Self {
        self.asset_type = asset_type;
        self
    }

    pub fn country(mut self, country: Option<impl Into<String>>) -> Self {
        self.country = country.map(Into::into);
        self
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(asset_type) = self.asset_type {
            if asset.asset_type() != asset_type {
                return false;
            }
        }
        if let Some(ref country) = self.country {
            match asset.country() {
                Some(c) if c.eq_ignore_ascii_case(country.trim()) => {}
                _ => return false,
            }
        }
        let hit = |pattern: &Regex| {
            pattern.is_match(asset.brand()) || pattern.is_match(asset.model())
        };
        self.include.iter().all(hit) && !self.ignore.iter().any(hit)
    }
}

/// The fields an asset listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Type,
    Brand,
    Model,
    Price,
    Date,
    Country,
    Status,
}

impl SortField {
    pub const NAMES: [&'static str; 7] =
        ["type", "brand", "model", "price", "date", "country", "status"];

    fn compare(&self, a: &Asset, b: &Asset, lifecycle: &Lifecycle) -> Ordering {
        match self {
            SortField::Type => a.asset_type().cmp(&b.asset_type()),
            SortField::Brand => caseless(a.brand(), b.brand()),
            SortField::Model => caseless(a.model(), b.model()),
            SortField::Price => a.price().total_cmp(&b.price()),
            SortField::Date => a.purchased().cmp(&b.purchased()),
            SortField::Country => {
                // Assets without a country go last.
                match (a.country(), b.country()) {
                    (Some(x), Some(y)) => caseless(x, y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            SortField::Status => lifecycle
                .classify(a.purchased())
                .cmp(&lifecycle.classify(b.purchased())),
        }
    }
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "type" => Ok(SortField::Type),
            "brand" => Ok(SortField::Brand),
            "model" => Ok(SortField::Model),
            "price" => Ok(SortField::Price),
            "date" | "purchased" => Ok(SortField::Date),
            "country" => Ok(SortField::Country),
            "status" => Ok(SortField::Status),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Type => "type",
            SortField::Brand => "brand",
            SortField::Model => "model",
            SortField::Price => "price",
            SortField::Date => "date",
            SortField::Country => "country",
            SortField::Status => "status",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// One key of a multi-key sort, written `field[:asc|:desc]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    /// Type, then status, then newest purchase first.
    pub fn defaults() -> Vec<SortKey> {
        vec![
            SortKey::asc(SortField::Type),
            SortKey::asc(SortField::Status),
            SortKey::desc(SortField::Date),
        ]
    }

    /// Parse a list of keys, e.g. from `--sort type,date:desc`.
    pub fn parse_all<S: AsRef<str>>(
        keys: &[S],
    ) -> Result<Vec<SortKey>, QueryError> {
        keys.iter()
            .flat_map(|k| k.as_ref().split(','))
            .filter(|k| !k.trim().is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn compare(&self, a: &Asset, b: &Asset, lifecycle: &Lifecycle) -> Ordering {
        let ordering = self.field.compare(a, b, lifecycle);
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };
        let field = field.parse()?;
        let direction = match direction.map(|d| d.trim().to_lowercase()) {
            None => Direction::Ascending,
            Some(d) => match d.as_str() {
                "asc" | "ascending" => Direction::Ascending,
                "desc" | "descending" => Direction::Descending,
                _ => return Err(QueryError::UnknownDirection(d)),
            },
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Ascending => write!(f, "{}", self.field),
            Direction::Descending => write!(f, "{}:desc", self.field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::builder::AssetBuilder;
    use chrono::NaiveDate;

    fn asset(asset_type: &str, brand: &str, country: Option<&str>) -> Asset {
        AssetBuilder::new()
            .asset_type(asset_type)
            .brand(brand)
            .model("Model")
            .price(100.0)
            .purchased(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
            .country(country)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_keys() {
        let keys =
            SortKey::parse_all(&["type,status", "date:desc", "price:ASC"])
                .unwrap();
        assert_eq!(
            keys,
            vec![
                SortKey::asc(SortField::Type),
                SortKey::asc(SortField::Status),
                SortKey::desc(SortField::Date),
                SortKey::asc(SortField::Price),
            ]
        );
        assert_eq!(
            "colour".parse::<SortKey>(),
            Err(QueryError::UnknownField("colour".to_string()))
        );
        assert_eq!(
            "date:sideways".parse::<SortKey>(),
            Err(QueryError::UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_key_display_parses_back() {
        for key in SortKey::defaults() {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_filter_type_and_country() {
        let filter = AssetFilter::all()
            .asset_type(Some(AssetType::Laptop))
            .country(Some("usa"));
        assert!(filter.matches(&asset("laptop", "Dell", Some("USA"))));
        assert!(!filter.matches(&asset("phone", "Dell", Some("USA"))));
        assert!(!filter.matches(&asset("laptop", "Dell", Some("Sweden"))));
        assert!(!filter.matches(&asset("laptop", "Dell", None)));
        assert!(AssetFilter::all().matches(&asset("phone", "Nokia", None)));
    }

    #[test]
    fn test_filter_patterns() {
        let filter = AssetFilter {
            include: vec![Regex::new("^(Dell|HP)$").unwrap()],
            ignore: vec![Regex::new("HP").unwrap()],
            ..Default::default()
        };
        assert!(filter.matches(&asset("laptop", "Dell", None)));
        assert!(!filter.matches(&asset("laptop", "HP", None)));
        assert!(!filter.matches(&asset("laptop", "Asus", None)));
    }
}
