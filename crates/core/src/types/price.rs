//! Display-price parsing using decimal arithmetic.
//!
//! Cart lines snapshot the catalog's formatted price (e.g. `"₱1,299.00"`).
//! Totals are computed from those strings by discarding every character that
//! is not an ASCII digit or `.` and reading the remaining number. Anything
//! unreadable counts as zero so totals are always defined.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extract the numeric amount from a formatted price string.
///
/// Only the first decimal point is honoured; digits after a second `.` are
/// ignored.
///
/// ```
/// use burvon_core::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("₱1,299.50"), Decimal::new(129_950, 2));
/// assert_eq!(parse_amount("free"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_amount(display: &str) -> Decimal {
    let mut numeric = String::with_capacity(display.len());
    let mut seen_dot = false;
    for c in display.chars() {
        match c {
            '0'..='9' => numeric.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                numeric.push(c);
            }
            '.' => break,
            _ => {}
        }
    }

    let numeric = numeric.trim_end_matches('.');
    if numeric.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(numeric).unwrap_or(Decimal::ZERO)
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., pesos, not centavos).
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

    /// Parse a formatted price, inferring the currency from its symbol.
    #[must_use]
    pub fn parse(display: &str) -> Self {
        Self {
            amount: parse_amount(display),
            currency_code: CurrencyCode::detect(display),
        }
    }

    /// Price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    PHP,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::PHP => "₱",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Guess the currency from a formatted price; defaults to PHP.
    #[must_use]
    pub fn detect(display: &str) -> Self {
        [Self::USD, Self::EUR, Self::GBP]
            .into_iter()
            .find(|code| display.contains(code.symbol()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_currency_and_grouping() {
        assert_eq!(parse_amount("₱1,299.00"), Decimal::new(129_900, 2));
        assert_eq!(parse_amount("$ 45"), Decimal::from(45));
        assert_eq!(parse_amount("PHP 2,500.75"), Decimal::new(250_075, 2));
    }

    #[test]
    fn test_parse_amount_unreadable_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("₱"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_second_dot_truncates() {
        assert_eq!(parse_amount("1.2.3"), Decimal::new(12, 1));
    }

    #[test]
    fn test_parse_amount_trailing_dot() {
        assert_eq!(parse_amount("₱10."), Decimal::from(10));
    }

    #[test]
    fn test_price_detects_currency() {
        assert_eq!(Price::parse("₱100").currency_code, CurrencyCode::PHP);
        assert_eq!(Price::parse("$100").currency_code, CurrencyCode::USD);
        assert_eq!(Price::parse("100").currency_code, CurrencyCode::PHP);
    }

    #[test]
    fn test_price_times_and_display() {
        let price = Price::parse("₱1,250.50").times(2);
        assert_eq!(price.amount, Decimal::new(250_100, 2));
        assert_eq!(price.to_string(), "₱2501.00");
    }
}
