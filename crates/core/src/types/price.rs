//! Unit price representation.
//!
//! Prices are stored as [`Decimal`] so that subtotals don't drift, but they
//! travel as plain JSON numbers (`"price": 10`) to stay compatible with the
//! persisted cart format. The number is written with every decimal digit,
//! never through `f64`, so any `Decimal` reloads unchanged. There is no
//! currency attached.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents (e.g. `1999` is `19.99`).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total: unit price times a (possibly negative) quantity.
    ///
    /// Returns `None` if the result does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_mul(&self, quantity: i64) -> Option<Decimal> {
        self.0.checked_mul(Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::arbitrary_precision::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(Price::from(10)).unwrap();
        assert!(json.is_number());
        assert!((json.as_f64().unwrap() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_deserializes_integers_and_floats() {
        let whole: Price = serde_json::from_str("10").unwrap();
        assert_eq!(whole, Price::from(10));

        let fractional: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional, Price::from_cents(1999));
    }

    #[test]
    fn test_price_from_cents() {
        assert_eq!(Price::from_cents(1050).amount(), Decimal::new(1050, 2));
        assert_eq!(Price::from_cents(-5).amount(), Decimal::new(-5, 2));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(1999).display(), "$19.99");
        assert_eq!(Price::from(3).display(), "$3.00");
    }

    #[test]
    fn test_price_keeps_every_digit() {
        let precise = Price::new("12345678901234567.89".parse().unwrap());
        let json = serde_json::to_string(&precise).unwrap();
        assert_eq!(json, "12345678901234567.89");
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), precise);

        let max = Price::new(Decimal::MAX);
        let json = serde_json::to_string(&max).unwrap();
        assert_eq!(json, "79228162514264337593543950335");
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), max);

        let min = Price::new(Decimal::MIN);
        let json = serde_json::to_string(&min).unwrap();
        assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), min);
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(Price::from_cents(250).checked_mul(3), Some(Decimal::new(750, 2)));
        assert_eq!(Price::from(10).checked_mul(-1), Some(Decimal::from(-10)));
        assert_eq!(Price::new(Decimal::MAX).checked_mul(2), None);
        assert_eq!(Price::new(Decimal::MAX).checked_mul(1), Some(Decimal::MAX));
    }
}
