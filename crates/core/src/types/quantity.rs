//! Cart line quantities.
//!
//! Quantities arrive as query-string text (`?quantity=1.5`), so parsing goes
//! through [`Decimal`] to tell "not a number" apart from "a number that is not
//! a whole count".

use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// No quantity was supplied.
    #[error("quantity is required")]
    Missing,
    /// The input is not a number.
    #[error("quantity must be a number, got {0:?}")]
    NotANumber(String),
    /// The number has a fractional part.
    #[error("quantity must be a whole number, got {0}")]
    Fractional(Decimal),
    /// The number is zero or negative.
    #[error("quantity must be at least 1, got {0}")]
    TooSmall(Decimal),
    /// The number does not fit in a `u32`.
    #[error("quantity {0} is too large")]
    TooLarge(Decimal),
}

/// A positive item count (at least 1).
///
/// ```
/// use sunglasses_core::Quantity;
///
/// assert_eq!(Quantity::parse("3").unwrap().get(), 3);
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("1.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a count, returning `None` for zero.
    #[must_use]
    pub const fn new(count: u32) -> Option<Self> {
        match NonZeroU32::new(count) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Parse a quantity from user input.
    ///
    /// Integral decimals such as `"3.0"` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError` if the input is empty, not numeric, fractional,
    /// below 1 or larger than `u32::MAX`.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QuantityError::Missing);
        }

        let value = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|_| QuantityError::NotANumber(s.to_owned()))?;

        if !value.fract().is_zero() {
            return Err(QuantityError::Fractional(value));
        }
        if value < Decimal::ONE {
            return Err(QuantityError::TooSmall(value));
        }

        value
            .to_u32()
            .and_then(Self::new)
            .ok_or(QuantityError::TooLarge(value))
    }

    /// The count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more of the same item. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_numbers() {
        assert_eq!(Quantity::parse("1").unwrap().get(), 1);
        assert_eq!(Quantity::parse("3").unwrap().get(), 3);
        assert_eq!(Quantity::parse("3.0").unwrap().get(), 3);
        assert_eq!(Quantity::parse(" 12 ").unwrap().get(), 12);
    }

    #[test]
    fn test_parse_rejects_below_one() {
        assert!(matches!(Quantity::parse("0"), Err(QuantityError::TooSmall(_))));
        assert!(matches!(Quantity::parse("-2"), Err(QuantityError::TooSmall(_))));
    }

    #[test]
    fn test_parse_rejects_fractions() {
        assert!(matches!(
            Quantity::parse("1.5"),
            Err(QuantityError::Fractional(_))
        ));
        assert!(matches!(
            Quantity::parse("0.5"),
            Err(QuantityError::Fractional(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Quantity::parse(""), Err(QuantityError::Missing));
        assert!(matches!(
            Quantity::parse("three"),
            Err(QuantityError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            Quantity::parse("4294967296"),
            Err(QuantityError::TooLarge(_))
        ));
        assert_eq!(Quantity::parse("4294967295").unwrap().get(), u32::MAX);
    }

    #[test]
    fn test_increment_saturates() {
        assert_eq!(Quantity::ONE.increment().get(), 2);
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment().get(), u32::MAX);
    }

    #[test]
    fn test_serde_rejects_zero() {
        let q: Quantity = serde_json::from_str("2").unwrap();
        assert_eq!(q.get(), 2);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
