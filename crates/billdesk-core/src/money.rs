//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The previous generation of this billing screen carried rupee amounts  │
//! │  as binary floats and formatted with toFixed(2) - cent drift was a     │
//! │  matter of time.                                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹10.99 is stored as 1099. All arithmetic is exact integer math;     │
//! │    rounding happens at exactly one place per derived value.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billdesk_core::money::Money;
//!
//! // Create from paise (preferred)
//! let rate = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = rate * 2;                      // ₹21.98
//! let total = rate + Money::from_paise(500);   // ₹15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::quantity::Qty;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: net amounts may legitimately go negative (a large
///   discount is not clamped), so the representation must carry sign
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support so payloads carry plain integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ```rust
    /// use billdesk_core::money::Money;
    ///
    /// let rate = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(rate.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part should be negative:
    /// `from_rupees_paise(-5, 50)` is -₹5.50, not -₹4.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99, absolute value).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies by a fixed-point quantity, rounding half up on the
    /// discarded thousandths.
    ///
    /// This is the line-amount calculation: `rate × qty`. Quantities are
    /// stored in thousandths (see [`Qty`]), so the product carries three
    /// extra decimal digits that are rounded away exactly once.
    ///
    /// ```rust
    /// use billdesk_core::money::Money;
    /// use billdesk_core::quantity::Qty;
    ///
    /// let rate = Money::from_paise(10000);            // ₹100.00
    /// let amount = rate.times_qty(Qty::from_units(2)); // ₹200.00
    /// assert_eq!(amount.paise(), 20000);
    ///
    /// // Fractional quantity: 1.5 kg at ₹10.99
    /// let amount = Money::from_paise(1099).times_qty(Qty::from_thousandths(1500));
    /// assert_eq!(amount.paise(), 1649); // 1648.5 rounds up
    /// ```
    pub fn times_qty(&self, qty: Qty) -> Money {
        // i128 prevents overflow on large amounts × large quantities
        let paise = (self.0 as i128 * qty.thousandths() as i128 + 500) / 1000;
        Money(paise as i64)
    }

    /// Calculates tax on this amount at the given rate, rounding half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 provides
    /// the rounding (5000/10000 = 0.5).
    ///
    /// ```rust
    /// use billdesk_core::money::Money;
    /// use billdesk_core::types::TaxRate;
    ///
    /// let amount = Money::from_paise(20000);   // ₹200.00
    /// let rate = TaxRate::from_bps(1800);      // 18% GST
    /// assert_eq!(amount.line_tax(rate).paise(), 3600); // ₹36.00
    /// ```
    pub fn line_tax(&self, rate: TaxRate) -> Money {
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(tax_paise as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. UI layers own real localized formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer counts.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, n: i64) -> Self {
        Money(self.0 * n)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_paise() {
        assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
        assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
    }

    #[test]
    fn test_times_qty_whole() {
        let rate = Money::from_paise(10000); // ₹100.00
        assert_eq!(rate.times_qty(Qty::from_units(2)).paise(), 20000);
    }

    #[test]
    fn test_times_qty_fractional_rounds_half_up() {
        // 1.5 × ₹10.99 = ₹16.485 → ₹16.49
        let rate = Money::from_paise(1099);
        assert_eq!(rate.times_qty(Qty::from_thousandths(1500)).paise(), 1649);

        // 0.25 × ₹1.00 = ₹0.25 exactly
        let rate = Money::from_paise(100);
        assert_eq!(rate.times_qty(Qty::from_thousandths(250)).paise(), 25);
    }

    #[test]
    fn test_line_tax_exact() {
        // ₹200.00 at 18% = ₹36.00
        let amount = Money::from_paise(20000);
        assert_eq!(amount.line_tax(TaxRate::from_bps(1800)).paise(), 3600);
    }

    #[test]
    fn test_line_tax_with_rounding() {
        // ₹10.00 at 8.25% = ₹0.825 → ₹0.83
        let amount = Money::from_paise(1000);
        assert_eq!(amount.line_tax(TaxRate::from_bps(825)).paise(), 83);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
        assert_eq!(Money::from_paise(-100).abs().paise(), 100);
    }
}
