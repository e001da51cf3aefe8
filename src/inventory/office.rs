use crate::currency::CurrencyCode;
use std::fmt;

/// A company office: the country label assets are tagged with and the
/// currency its reports are priced in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Office {
    pub country: String,
    pub currency: CurrencyCode,
}

impl Office {
    pub fn new(country: impl Into<String>, currency: CurrencyCode) -> Self {
        Self {
            country: country.into(),
            currency,
        }
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.country, self.currency)
    }
}

/// The offices known out of the box.
pub fn default_offices() -> Vec<Office> {
    [
        ("USA", "USD"),
        ("Germany", "EUR"),
        ("United Kingdom", "GBP"),
        ("Sweden", "SEK"),
    ]
    .into_iter()
    .filter_map(|(country, code)| {
        code.parse().ok().map(|currency| Office::new(country, currency))
    })
    .collect()
}

/// Find the office for a country label, ignoring case.
pub fn find_office<'a>(offices: &'a [Office], country: &str) -> Option<&'a Office> {
    offices
        .iter()
        .find(|o| o.country.eq_ignore_ascii_case(country.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_office() {
        let offices = default_offices();
        assert_eq!(offices.len(), 4);
        let office = find_office(&offices, "sweden").unwrap();
        assert_eq!(office.currency.to_string(), "SEK");
        assert_eq!(office.to_string(), "Sweden (SEK)");
        assert!(find_office(&offices, "France").is_none());
    }
}
