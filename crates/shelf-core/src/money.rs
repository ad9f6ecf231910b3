//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A price typed as "9.99" must come back out of the database as "9.99". │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" ──parse──► 999 cents ──store──► 999 ──display──► "9.99"      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price: Money = "9.99".parse().unwrap();
//! assert_eq!(price.cents(), 999);
//! assert_eq!(price.to_string(), "9.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A decimal amount with two fractional digits, stored as whole cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: the store accepts any numeric price, negatives included
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serializes as the plain cent count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
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

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as a plain decimal, e.g. `9.99` or `-0.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Parses a decimal amount such as `9.99`, `10`, `.5` or `-0.5`.
///
/// ## Rules
/// ```text
/// "9.99"  ──► 999      "10"    ──► 1000
/// "0.5"   ──► 50       "-1.25" ──► -125
/// "9.999" ──► 1000     "1.004" ──► 100   (nearest cent, half away from zero)
/// ""      ──► error
/// ```
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (major_str, minor_str) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(CoreError::invalid_price(input, "no digits"));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CoreError::invalid_price(input, "not a decimal number"));
        }
        let (minor_str, round_up) = match minor_str.get(2..) {
            Some(rest) => (&minor_str[..2], rest.starts_with(['5', '6', '7', '8', '9'])),
            None => (minor_str, false),
        };

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| CoreError::invalid_price(input, "amount too large"))?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().unwrap_or(0) * 10,
            _ => minor_str.parse().unwrap_or(0),
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .and_then(|c| c.checked_add(i64::from(round_up)))
            .ok_or_else(|| CoreError::invalid_price(input, "amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
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
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(999).to_string(), "9.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
        assert_eq!(" -1.25 ".parse::<Money>().unwrap().cents(), -125);
        assert_eq!("+2".parse::<Money>().unwrap().cents(), 200);
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "-", ".", "abc", "1.2.3", "9.9x9", "1,50", "--1"] {
            let err = input.parse::<Money>().unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidPrice { .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rounds_extra_decimals() {
        assert_eq!("9.999".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("1.005".parse::<Money>().unwrap().cents(), 101);
        assert_eq!("1.0049".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("-2.345".parse::<Money>().unwrap().cents(), -235);
        assert_eq!("0.12345".parse::<Money>().unwrap().cents(), 12);
    }

    #[test]
    fn test_parse_overflow() {
        let err = "99999999999999999999".parse::<Money>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice { .. }));
    }

    #[test]
    fn test_parse_display_agree() {
        for cents in [0, 1, 99, 100, 999, 123_456, -7, -1000] {
            let money = Money::from_cents(cents);
            assert_eq!(money.to_string().parse::<Money>().unwrap(), money);
        }
    }
}
