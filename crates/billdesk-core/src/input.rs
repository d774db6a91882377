//! # Lenient Numeric Input
//!
//! The billing grid takes quantity, rate and discount from free-text fields.
//! The previous screen relied on `parseFloat(x) || 0`, which silently turned
//! garbage into zero. We keep that operator-facing behavior, but as named,
//! testable functions instead of an accident of the parser:
//!
//! - malformed input coerces to zero, never to an error
//! - a negative *discount* clamps to zero at this layer
//! - a negative *rate* or *quantity* is passed through so the cart can apply
//!   its own rule (reject the rate; treat the quantity as a removal)
//!
//! Parsing is pure integer fixed-point - no float round-trip.

use crate::money::Money;
use crate::quantity::Qty;

/// Parses a decimal string into fixed-point with `scale` fractional digits.
/// Digits beyond the scale are ignored. Returns None on anything that is not
/// a plain signed decimal number.
fn parse_fixed(input: &str, scale: u32) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let (negative, s) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut value: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };

    for i in 0..scale {
        value = value.checked_mul(10)?;
        if let Some(d) = frac.as_bytes().get(i as usize) {
            value = value.checked_add((d - b'0') as i64)?;
        }
    }

    Some(if negative { -value } else { value })
}

/// Parses a quantity field. Malformed input coerces to zero (which the cart
/// treats as line removal). Sign is preserved.
pub fn parse_qty(input: &str) -> Qty {
    Qty::from_thousandths(parse_fixed(input, 3).unwrap_or(0))
}

/// Parses a rate field. Malformed input coerces to zero. Sign is preserved
/// so `Cart::set_rate` can reject negatives explicitly.
pub fn parse_rate(input: &str) -> Money {
    Money::from_paise(parse_fixed(input, 2).unwrap_or(0))
}

/// Parses the discount field. Malformed input coerces to zero and negative
/// amounts clamp to zero.
pub fn parse_discount(input: &str) -> Money {
    Money::from_paise(parse_fixed(input, 2).unwrap_or(0).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_qty_valid() {
        assert_eq!(parse_qty("2"), Qty::from_units(2));
        assert_eq!(parse_qty("1.5"), Qty::from_thousandths(1500));
        assert_eq!(parse_qty(".25"), Qty::from_thousandths(250));
        assert_eq!(parse_qty(" 3 "), Qty::from_units(3));
    }

    #[test]
    fn test_parse_qty_malformed_coerces_to_zero() {
        assert_eq!(parse_qty(""), Qty::zero());
        assert_eq!(parse_qty("abc"), Qty::zero());
        assert_eq!(parse_qty("1.2.3"), Qty::zero());
        assert_eq!(parse_qty("2x"), Qty::zero());
    }

    #[test]
    fn test_parse_qty_negative_passes_through() {
        // The cart turns non-positive quantities into removals
        assert_eq!(parse_qty("-2"), Qty::from_units(-2));
    }

    #[test]
    fn test_parse_qty_excess_precision_ignored() {
        assert_eq!(parse_qty("0.1234"), Qty::from_thousandths(123));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("100"), Money::from_paise(10000));
        assert_eq!(parse_rate("10.99"), Money::from_paise(1099));
        assert_eq!(parse_rate("junk"), Money::zero());
        // Negative preserved; the cart rejects it with InvalidValue
        assert_eq!(parse_rate("-5"), Money::from_paise(-500));
    }

    #[test]
    fn test_parse_discount_clamps_negative() {
        assert_eq!(parse_discount("10"), Money::from_paise(1000));
        assert_eq!(parse_discount("-10"), Money::zero());
        assert_eq!(parse_discount("?"), Money::zero());
    }
}
