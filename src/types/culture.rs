//! Culture reference data: locales, currencies and markets.

use super::ResultStatus;
use serde::Deserialize;

/// More fraction digits than any real currency uses.
const MAX_DECIMAL_DIGITS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Locale {
    /// e.g. `en-GB`.
    pub code: String,
    pub name: String,
}

/// Currency and how amounts in it are formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub symbol_on_left: bool,
    pub space_between_amount_and_symbol: bool,
    pub decimal_digits: i32,
}

impl Currency {
    /// Render an amount in whole units using this currency's formatting rules.
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        let digits = usize::try_from(self.decimal_digits)
            .unwrap_or_default()
            .min(MAX_DECIMAL_DIGITS);
        let fixed = format!("{:.*}", digits, amount.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }
        if let Some(frac_part) = frac_part {
            grouped.push_str(&self.decimal_separator);
            grouped.push_str(frac_part);
        }

        let space = if self.space_between_amount_and_symbol {
            " "
        } else {
            ""
        };
        let sign = if amount < 0.0 { "-" } else { "" };
        if self.symbol_on_left {
            format!("{sign}{}{space}{grouped}", self.symbol)
        } else {
            format!("{sign}{grouped}{space}{}", self.symbol)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Market {
    /// e.g. `UK`.
    pub code: String,
    pub name: String,
}

/// Response of `GET /culture/locales`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Locales {
    pub status: ResultStatus,
    pub locales: Vec<Locale>,
}

/// Response of `GET /culture/currencies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Currencies {
    pub status: ResultStatus,
    pub currencies: Vec<Currency>,
}

/// Response of `GET /culture/markets/{locale}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Markets {
    pub status: ResultStatus,
    pub markets: Vec<Market>,
}

/// Best-guess culture for an IP address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct NearestCulture {
    pub status: ResultStatus,
    pub market: Market,
    pub locale: Locale,
    pub currency: Currency,
}
