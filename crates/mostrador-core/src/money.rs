//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE STRING-PRICE PROBLEM                                               │
//! │                                                                         │
//! │  The backend sends prices as 19990, 19990.0 or "19990":                 │
//! │    "19990" + 10 = "1999010"                                 ❌ WRONG!   │
//! │                                                                         │
//! │  OUR SOLUTION: Parse once at the boundary into integer pesos            │
//! │    Money::from_minor(19990) + Money::from_minor(10) = 20000             │
//! │    Every cart total and line total stays an integer                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Chilean pesos have no minor unit, so the "smallest currency unit" is one
//! peso. Markup arithmetic that needs fractions runs on `Decimal` in
//! [`crate::markup`] and only comes back to `Money` for display.
//!
//! ## Usage
//! ```rust
//! use mostrador_core::money::Money;
//!
//! let price = Money::from_minor(19_990);
//! let line = price * 3u32;
//! assert_eq!(line.minor(), 59_970);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::format::{group_digits, NumberLocale};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (whole pesos for CLP).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Variation.list_price ──┬──► CartLineItem.unit_price ──► Cart total     │
/// │                         │                                               │
/// │                         └──► Displayed as "$19.990" in UI               │
/// │                                                                         │
/// │  Variation.cost_price ──► Markup engine (Decimal) ──► gross price      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use mostrador_core::money::Money;
    ///
    /// let price = Money::from_minor(1999);
    /// assert_eq!(price.minor(), 1999);
    /// ```
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Converts a decimal amount, discarding the fractional part.
    ///
    /// Truncation follows the display rule used everywhere else: `166.6`
    /// becomes `166`, `-0.5` becomes `0`.
    pub fn from_decimal_truncated(amount: Decimal) -> CoreResult<Self> {
        amount
            .trunc()
            .to_i64()
            .map(Money)
            .ok_or_else(|| CoreError::format(amount.to_string(), "amount out of range"))
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value as a `Decimal` for markup arithmetic.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as es-CL currency: `$19.990`, `-$500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}",
            sign,
            group_digits(self.0.unsigned_abs(), NumberLocale::EsCl)
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(19_990).to_string(), "$19.990");
        assert_eq!(Money::from_minor(500).to_string(), "$500");
        assert_eq!(Money::from_minor(-1_500).to_string(), "-$1.500");
        assert_eq!(Money::from_minor(0).to_string(), "$0");
        assert_eq!(Money::from_minor(1_234_567).to_string(), "$1.234.567");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a * 3u32).minor(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    #[test]
    fn test_from_decimal_truncates() {
        assert_eq!(Money::from_decimal_truncated(dec!(166.6)).unwrap().minor(), 166);
        assert_eq!(Money::from_decimal_truncated(dec!(-0.5)).unwrap().minor(), 0);
        assert_eq!(Money::from_decimal_truncated(dec!(238)).unwrap().minor(), 238);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
        assert_eq!(Money::default().to_decimal(), Decimal::ZERO);

        let mut total = Money::default();
        total += Money::from_minor(9_990) * 2u32;
        assert_eq!(total.to_string(), "$19.980");
    }
}
