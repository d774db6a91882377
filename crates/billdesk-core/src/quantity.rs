//! # Quantity Module
//!
//! Fixed-point quantities for cart lines.
//!
//! Retail quantities are not always whole numbers: loose goods are billed at
//! 0.5 kg, 1.25 m and so on. The entry field accepts fractional input, so the
//! domain type must carry it without falling back to binary floats.
//!
//! `Qty` stores thousandths in an i64 - three decimal digits of quantity
//! precision, the same trick `Money` uses for paise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cart-line quantity in thousandths.
///
/// A `Qty` inside a cart line is always positive; zero and negative values
/// exist only transiently as "remove this line" sentinels (see
/// `Cart::set_quantity`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Qty(i64);

impl Qty {
    /// One unit.
    pub const ONE: Qty = Qty(1000);

    /// Creates a quantity from thousandths (1500 = 1.5).
    #[inline]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Qty(thousandths)
    }

    /// Creates a whole-number quantity.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Qty(units * 1000)
    }

    /// Returns the raw thousandths value.
    #[inline]
    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Qty(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds one unit. Used by add-or-increment when an item is re-selected.
    #[inline]
    pub const fn plus_one(&self) -> Self {
        Qty(self.0 + 1000)
    }
}

/// Displays without trailing zeros: `2`, `1.5`, `0.125`.
impl fmt::Display for Qty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 1000;
        let frac = (self.0 % 1000).abs();
        if frac == 0 {
            write!(f, "{}", units)
        } else {
            let s = format!("{:03}", frac);
            write!(f, "{}.{}", units, s.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Qty::from_units(2).thousandths(), 2000);
        assert_eq!(Qty::from_thousandths(1500).thousandths(), 1500);
        assert_eq!(Qty::ONE, Qty::from_units(1));
    }

    #[test]
    fn test_plus_one() {
        assert_eq!(Qty::from_units(1).plus_one(), Qty::from_units(2));
        assert_eq!(Qty::from_thousandths(500).plus_one(), Qty::from_thousandths(1500));
    }

    #[test]
    fn test_display() {
        assert_eq!(Qty::from_units(2).to_string(), "2");
        assert_eq!(Qty::from_thousandths(1500).to_string(), "1.5");
        assert_eq!(Qty::from_thousandths(125).to_string(), "0.125");
        assert_eq!(Qty::zero().to_string(), "0");
    }

    #[test]
    fn test_sign_checks() {
        assert!(Qty::zero().is_zero());
        assert!(!Qty::zero().is_positive());
        assert!(Qty::ONE.is_positive());
        assert!(!Qty::from_thousandths(-500).is_positive());
    }
}
