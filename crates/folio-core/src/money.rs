//! # Money Module
//!
//! Provides the `Money` type for book prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE ROUND-TRIP PROBLEM                                                 │
//! │                                                                         │
//! │  With floating point prices:                                            │
//! │    9.99 × 3 = 29.969999999999995   ❌ WRONG on the stock report!        │
//! │    "9.99" → f64 → "9.990000000000001" after a careless save            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" → 999 cents → "9.99"     exact, every save and load          │
//! │    999 × 3 = 2997 cents            exact inventory value               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//!
//! // File format uses plain decimal rendering
//! assert_eq!(price.to_decimal_string(), "9.99");
//! assert_eq!(Money::from_cents(1000).to_decimal_string(), "10");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Parsing accepts a sign so that validation, not the
///   parser, decides whether a negative price is acceptable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as the bare cent count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a stock quantity.
    ///
    /// Saturates instead of overflowing; a catalog worth more than
    /// `i64::MAX` cents is not a realistic input.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(999); // $9.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 2997);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Renders the value the way the catalog file stores it.
    ///
    /// ## Rendering Rules
    /// ```text
    /// 999  cents → "9.99"
    /// 1250 cents → "12.5"    (trailing zero dropped)
    /// 1000 cents → "10"      (no decimal point at all)
    /// 5    cents → "0.05"
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = self.dollars().abs();
        let minor = self.cents_part();

        if minor == 0 {
            format!("{sign}{major}")
        } else if minor % 10 == 0 {
            format!("{sign}{major}.{}", minor / 10)
        } else {
            format!("{sign}{major}.{minor:02}")
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a plain decimal such as `9.99`, `10` or `12.5`.
///
/// ## Accepted Grammar
/// ```text
/// [-] digits [ . digit [digit] ]
/// ```
/// Anything else (exponents, thousands separators, three decimals,
/// a bare trailing point) is an `InvalidFormat` error.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal number such as 9.99"));
        }

        let minor = match minor_str {
            None => 0,
            Some(m) if m.is_empty() || m.len() > 2 || !m.chars().all(|c| c.is_ascii_digit()) => {
                return Err(invalid("at most two digits are allowed after the decimal point"));
            }
            Some(m) if m.len() == 1 => m.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            Some(m) => m.parse::<i64>().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major_str
            .parse::<i64>()
            .ok()
            .and_then(|major| major.checked_mul(100))
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("value is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a currency sign and two decimals.
///
/// ## Note
/// This is the report format. The catalog file uses
/// [`Money::to_decimal_string`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rendered = format!("{}${}.{:02}", sign, self.dollars().abs(), self.cents_part());
        f.pad(&rendered)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{:>8}", Money::from_cents(999)), "   $9.99");
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(Money::from_cents(999).to_decimal_string(), "9.99");
        assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.5");
        assert_eq!(Money::from_cents(1000).to_decimal_string(), "10");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(0).to_decimal_string(), "0");
        assert_eq!(Money::from_cents(-150).to_decimal_string(), "-1.5");
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("0.05".parse::<Money>().unwrap().cents(), 5);
        assert_eq!(" 7.25 ".parse::<Money>().unwrap().cents(), 725);
        assert_eq!("-3.10".parse::<Money>().unwrap().cents(), -310);
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "abc", "9.999", "9.", ".5", "1e3", "1,000", "--1", "9.9x"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} should not parse");
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_parse_names_the_decimal_limit() {
        let err = "12.345".parse::<Money>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "price has invalid format: at most two digits are allowed after the decimal point"
        );
    }

    #[test]
    fn test_decimal_round_trip() {
        for cents in [0, 1, 10, 99, 100, 999, 1250, 123456] {
            let money = Money::from_cents(cents);
            let back: Money = money.to_decimal_string().parse().unwrap();
            assert_eq!(back, money);
        }
    }

    #[test]
    fn test_multiply_and_sum() {
        let unit_price = Money::from_cents(999);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 2997);
        assert_eq!(unit_price.multiply_quantity(0), Money::zero());

        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
    }
}
