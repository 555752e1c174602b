//! Monetary amounts with lenient price parsing.
//!
//! Persisted carts from older app versions carry prices in several shapes:
//! formatted strings (`"$4.20"`, `"$3,800"`), bare decimal strings, and JSON
//! numbers. [`Money`] normalizes all of them into a single non-negative
//! decimal amount and formats back to the canonical `$x.xx` display form.

use core::fmt;
use core::ops::{Add, AddAssign, Mul};
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("monetary amount cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative monetary amount.
///
/// The inner value is kept unrounded; rounding to 2 decimal places happens
/// only at display time so repeated arithmetic does not compound rounding
/// error.
///
/// ## Examples
///
/// ```
/// use brewline_core::Money;
///
/// let price = Money::parse_loose("$4.20");
/// assert_eq!(price.to_string(), "$4.20");
/// assert_eq!(Money::parse_loose("$3,800"), Money::parse_loose("3800"));
/// assert_eq!(Money::parse_loose("free"), Money::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Money` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a heterogeneous price representation.
    ///
    /// Strips every character that is not an ASCII digit or a decimal point,
    /// then parses the remainder as a decimal number. This is a total
    /// function:
    ///
    /// - input with no digits parses to zero
    /// - a second decimal point ends the number (`"3.8.00"` parses as `3.8`,
    ///   matching how the legacy app's `parseFloat` read it)
    ///
    /// Parsing is idempotent: feeding the `Display` output back in yields the
    /// same value.
    #[must_use]
    pub fn parse_loose(input: &str) -> Self {
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
            return Self::ZERO;
        }

        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_str(truncate_at_second_point(&cleaned)))
            .map_or(Self::ZERO, Self)
    }

    /// The unrounded decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount rounded to 2 decimal places (display precision).
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract `other`, returning `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        (self.0 >= other.0).then(|| Self(self.0 - other.0))
    }
}

/// Cut a numeric string at its second decimal point, if any.
fn truncate_at_second_point(s: &str) -> &str {
    let mut points = s.char_indices().filter(|(_, c)| *c == '.');
    let _ = points.next();
    points
        .next()
        .and_then(|(i, _)| s.get(..i))
        .unwrap_or(s)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.rounded();
        amount.rescale(2);
        write!(f, "${amount}")
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

/// The shapes a persisted price can take.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoneyRepr {
    /// Decimal string, e.g. `"4.20"`.
    Exact(Decimal),
    /// JSON number, e.g. `4.2`.
    Number(f64),
    /// Formatted string, e.g. `"$4.20"`.
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let money = match MoneyRepr::deserialize(deserializer)? {
            MoneyRepr::Exact(d) => Self(d.max(Decimal::ZERO)),
            MoneyRepr::Number(n) => Decimal::from_f64(n)
                .map_or(Self::ZERO, |d| Self(d.max(Decimal::ZERO))),
            MoneyRepr::Text(s) => Self::parse_loose(&s),
        };
        Ok(money)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_formatted_price() {
        assert_eq!(Money::parse_loose("$4.20").amount(), dec("4.20"));
        assert_eq!(Money::parse_loose("$3,800").amount(), dec("3800"));
        assert_eq!(Money::parse_loose("4.20").amount(), dec("4.20"));
    }

    #[test]
    fn test_parse_no_digits_is_zero() {
        assert_eq!(Money::parse_loose(""), Money::ZERO);
        assert_eq!(Money::parse_loose("free"), Money::ZERO);
        assert_eq!(Money::parse_loose("$"), Money::ZERO);
        assert_eq!(Money::parse_loose("..."), Money::ZERO);
    }

    #[test]
    fn test_parse_multiple_points_is_lenient() {
        // Pinned policy: the number ends at the second decimal point.
        assert_eq!(Money::parse_loose("3.8.00").amount(), dec("3.8"));
        assert_eq!(Money::parse_loose("$1.2.3.4").amount(), dec("1.2"));
    }

    #[test]
    fn test_parse_display_round_trip() {
        for input in ["$4.20", "$3,800", "0.5", "$12.40"] {
            let money = Money::parse_loose(input);
            let reparsed = Money::parse_loose(&money.to_string());
            assert_eq!(reparsed.rounded(), money.rounded(), "round-trip of {input}");
        }
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(Money::new(dec("-1")).is_err());
        assert!(Money::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::parse_loose("3800").to_string(), "$3800.00");
        assert_eq!(Money::parse_loose("4.2").to_string(), "$4.20");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_checked_sub() {
        let a = Money::parse_loose("200");
        let b = Money::parse_loose("150");
        assert_eq!(a.checked_sub(b), Some(Money::parse_loose("50")));
        assert_eq!(b.checked_sub(a), None);
    }

    #[test]
    fn test_mul_by_quantity() {
        let price = Money::parse_loose("4.20");
        assert_eq!((price * 2).amount(), dec("8.40"));
    }

    #[test]
    fn test_deserialize_all_shapes() {
        let exact: Money = serde_json::from_str("\"4.20\"").unwrap();
        let number: Money = serde_json::from_str("4.2").unwrap();
        let formatted: Money = serde_json::from_str("\"$4.20\"").unwrap();
        assert_eq!(exact.rounded(), dec("4.20"));
        assert_eq!(number.rounded(), dec("4.20"));
        assert_eq!(formatted.rounded(), dec("4.20"));
    }

    #[test]
    fn test_serialize_as_decimal_string() {
        let money = Money::parse_loose("4.20");
        assert_eq!(serde_json::to_string(&money).unwrap(), "\"4.20\"");
    }
}
