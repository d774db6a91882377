//! # Bill Number Generation
//!
//! Bill numbers follow the backend's format: kind prefix + two-digit year +
//! zero-padded sequence, e.g. `INV2600042`. Sequences run per kind and per
//! year and restart at 1 when the year rolls over.
//!
//! The generator is pure: callers pass the date, so tests are deterministic
//! and the core crate stays free of clock access.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::types::BillKind;

/// Width of the sequence portion of a bill number.
const SEQUENCE_WIDTH: usize = 5;

/// Hands out sequential bill numbers per (kind, year).
///
/// In a deployment the authoritative sequence lives with the backend; this
/// generator provides the session-local numbers shown while a bill is being
/// composed, matching the backend's format so the operator sees the same
/// shape before and after save.
#[derive(Debug, Default)]
pub struct BillNumberGenerator {
    counters: HashMap<(BillKind, i32), u32>,
}

impl BillNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next bill number for the given kind and date.
    pub fn next_for(&mut self, kind: BillKind, date: NaiveDate) -> String {
        let year = date.year();
        let counter = self.counters.entry((kind, year)).or_insert(0);
        *counter += 1;
        format!(
            "{}{:02}{:0width$}",
            kind.prefix(),
            year % 100,
            counter,
            width = SEQUENCE_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_and_sequence() {
        let mut gen = BillNumberGenerator::new();
        assert_eq!(gen.next_for(BillKind::TaxInvoice, date(2026, 8, 25)), "INV2600001");
        assert_eq!(gen.next_for(BillKind::TaxInvoice, date(2026, 8, 25)), "INV2600002");
    }

    #[test]
    fn test_sequences_independent_per_kind() {
        let mut gen = BillNumberGenerator::new();
        gen.next_for(BillKind::TaxInvoice, date(2026, 1, 1));
        gen.next_for(BillKind::TaxInvoice, date(2026, 1, 1));

        assert_eq!(gen.next_for(BillKind::SaleChallan, date(2026, 1, 1)), "SC2600001");
        assert_eq!(gen.next_for(BillKind::Quotation, date(2026, 1, 1)), "QT2600001");
        assert_eq!(gen.next_for(BillKind::Purchase, date(2026, 1, 1)), "PUR2600001");
    }

    #[test]
    fn test_sequence_restarts_on_year_rollover() {
        let mut gen = BillNumberGenerator::new();
        gen.next_for(BillKind::TaxInvoice, date(2026, 12, 31));
        assert_eq!(gen.next_for(BillKind::TaxInvoice, date(2027, 1, 1)), "INV2700001");
    }
}
