//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing doubles across a night of sales:                               │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    The operator types "149.99" once, it becomes 14999 cents, and       │
//! │    every sale, donation and total after that is integer math.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_cents(7500); // $75.00
//! let family_pack = price * 4u32;      // $300.00
//! assert_eq!(family_pack.to_string(), "$300.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::types::CharityRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Section.price ──► sale = price × package size ──► units_sold bookkeeping
///                                 │
///                                 ├──► charity_share(rate) ──► receipt
///                                 │
///                                 └──► SalesSummary totals
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an operator-entered dollar amount to the nearest cent.
    ///
    /// This is the only place a float becomes money. Prices are validated as
    /// real numbers first (see [`crate::validation::validate_number`]) and
    /// rounded here exactly once.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// assert_eq!(Money::round_from_dollars(149.99).cents(), 14999);
    /// assert_eq!(Money::round_from_dollars(75.5).cents(), 7550);
    /// ```
    pub fn round_from_dollars(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
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

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates the charity share of this amount.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 keeps large totals from overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    /// use kiosk_core::types::CharityRate;
    ///
    /// let sale = Money::from_cents(30000);     // $300.00
    /// let rate = CharityRate::from_bps(1500);  // 15%
    /// assert_eq!(sale.charity_share(rate).cents(), 4500);
    /// ```
    pub fn charity_share(&self, rate: CharityRate) -> Money {
        let share = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(share as i64)
    }

    /// Multiplies money by a ticket count.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$1234.50`.
///
/// Uses `Formatter::pad`, so width and alignment flags work in report columns
/// (`format!("{:<20}", price)`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, self.dollars().abs(), self.cents_part());
        f.pad(&text)
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

/// Multiplication by a ticket count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_round_from_dollars() {
        assert_eq!(Money::round_from_dollars(150.0).cents(), 15000);
        assert_eq!(Money::round_from_dollars(10.0).cents(), 1000);
        assert_eq!(Money::round_from_dollars(499.999).cents(), 50000);
        // 0.1 is not exact in binary, rounding hides that
        assert_eq!(Money::round_from_dollars(75.1).cents(), 7510);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:<10}|", Money::from_cents(15000)), "$150.00   |");
        assert_eq!(format!("{:>10}|", Money::from_cents(15000)), "   $150.00|");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let tripled: Money = a * 3u32;
        assert_eq!(tripled.cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_charity_share_basic() {
        // $300.00 at 15% = $45.00
        let sale = Money::from_cents(30000);
        assert_eq!(sale.charity_share(CharityRate::from_bps(1500)).cents(), 4500);
    }

    #[test]
    fn test_charity_share_rounds_half_up() {
        // $10.05 at 10% = $1.005 → $1.01
        let sale = Money::from_cents(1005);
        assert_eq!(sale.charity_share(CharityRate::from_bps(1000)).cents(), 101);
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero().is_zero());
        assert!(!Money::from_cents(1).is_zero());
        assert_eq!(Money::default(), Money::zero());
    }
}
