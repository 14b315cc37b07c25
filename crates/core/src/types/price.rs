//! Price display using decimal arithmetic.
//!
//! Catalog prices travel as bare decimals in the product descriptor; the
//! currency is a property of the shop, not of each product. [`Price`] pairs
//! an amount with the shop currency for display.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Format for display (e.g., "250 ₽", "$19.99").
    ///
    /// Whole amounts are shown without a fractional part, anything else
    /// with two decimal places.
    #[must_use]
    pub fn display(&self) -> String {
        let amount = if self.amount.fract().is_zero() {
            self.amount.trunc().normalize().to_string()
        } else {
            format!("{:.2}", self.amount)
        };

        match self.currency_code {
            CurrencyCode::USD => format!("${amount}"),
            CurrencyCode::RUB | CurrencyCode::EUR => {
                format!("{amount} {}", self.currency_code.symbol())
            }
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Error returned when parsing an unsupported currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used in display strings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::RUB => "₽",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RUB => "RUB",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUB" => Ok(Self::RUB),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            _ => Err(CurrencyCodeError(s.to_string())),
        }
    }
}
