//! Scalars shared across the API: session tokens, dates and prices.

use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError};
use thiserror::Error;

/// Opaque handle returned by a search create call and required to poll it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&SessionToken> for SessionToken {
    fn from(value: &SessionToken) -> Self {
        value.clone()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date without a time zone, as used by query legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalDate {
    pub year: i32,
    /// 1-based month.
    pub month: i32,
    pub day: i32,
}

impl LocalDate {
    #[must_use]
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Local wall-clock time of a departure or arrival.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

impl LocalDateTime {
    #[must_use]
    pub fn date(&self) -> LocalDate {
        LocalDate::new(self.year, self.month, self.day)
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:02}",
            self.date(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

wire_enum! {
    /// Scale of [`Price::amount`].
    pub struct PriceUnit {
        UNSPECIFIED = "PRICE_UNIT_UNSPECIFIED",
        /// Whole units: pounds, euros.
        WHOLE = "PRICE_UNIT_WHOLE",
        /// Hundredths: cents.
        CENTI = "PRICE_UNIT_CENTI",
        MILLI = "PRICE_UNIT_MILLI",
        MICRO = "PRICE_UNIT_MICRO",
    }
    default = UNSPECIFIED;
}

impl PriceUnit {
    /// Divisor turning an amount in this unit into whole units.
    ///
    /// Unspecified and unrecognised units count as whole units.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        match self.as_str() {
            "PRICE_UNIT_CENTI" => 100.0,
            "PRICE_UNIT_MILLI" => 1_000.0,
            "PRICE_UNIT_MICRO" => 1_000_000.0,
            _ => 1.0,
        }
    }
}

/// Failure to read a [`Price`] amount as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price amount {amount:?}: {source}")]
pub struct PriceError {
    pub amount: String,
    #[source]
    pub source: ParseIntError,
}

/// Integer amount in a given [`PriceUnit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub amount: String,
    pub unit: PriceUnit,
}

impl Price {
    #[must_use]
    pub fn new(amount: impl Into<String>, unit: PriceUnit) -> Self {
        Self {
            amount: amount.into(),
            unit,
        }
    }

    /// Amount in whole currency units. An empty amount is zero.
    pub fn to_f64(&self) -> Result<f64, PriceError> {
        if self.amount.is_empty() {
            return Ok(0.0);
        }
        let amount: i64 = self.amount.parse().map_err(|source| PriceError {
            amount: self.amount.clone(),
            source,
        })?;
        Ok(amount as f64 / self.unit.scale_factor())
    }
}
