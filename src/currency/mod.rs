//! Currency codes and fixed-rate conversion.
//!
//! Rates are quoted relative to USD and never change once the table has been
//! built at startup. Converting `amount` from `X` to `Y` yields
//! `amount * rate(Y) / rate(X)`.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error;

/// The rates compiled into the binary, relative to USD.
pub const DEFAULT_RATES: [(&str, f64); 4] =
    [("USD", 1.0), ("EUR", 0.85), ("GBP", 0.75), ("SEK", 8.5)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("unknown currency '{0}'")]
    UnknownCurrency(CurrencyCode),
    #[error("'{0}' is not a currency code, expected three ASCII letters")]
    InvalidCode(String),
    #[error("rate for '{0}' must be a positive number")]
    InvalidRate(CurrencyCode),
}

/// A three letter currency code, always upper case.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CurrencyError::InvalidCode(s.to_string()));
        }
        let mut code = [0u8; 3];
        for (slot, b) in code.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Self(code))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A fixed table of conversion rates relative to USD.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<CurrencyCode, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .filter_map(|(code, rate)| {
                code.parse::<CurrencyCode>().ok().map(|c| (c, *rate))
            })
            .collect();
        Self { rates }
    }
}

impl RateTable {
    /// Add or replace a rate.
    pub fn with_rate(
        mut self,
        code: CurrencyCode,
        rate: f64,
    ) -> Result<Self, CurrencyError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CurrencyError::InvalidRate(code));
        }
        self.rates.insert(code, rate);
        Ok(self)
    }

    /// Layer textual overrides (e.g. from a config file) on top of this table.
    pub fn with_overrides<'a>(
        self,
        overrides: impl IntoIterator<Item = (&'a String, &'a f64)>,
    ) -> Result<Self, CurrencyError> {
        overrides.into_iter().try_fold(self, |table, (code, rate)| {
            table.with_rate(code.parse()?, *rate)
        })
    }

    /// The rate of `code` relative to USD.
    pub fn rate(&self, code: &CurrencyCode) -> Result<f64, CurrencyError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.clone()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }
}

/// Convert `amount` between two currencies of `table`.
pub fn convert(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Result<f64, CurrencyError> {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    if from == to {
        return Ok(amount);
    }
    Ok(amount * to_rate / from_rate)
}
