//! # Held Bills
//!
//! A held bill is a cart snapshot set aside mid-composition - the counter
//! serves a quick customer, then recalls the interrupted bill. The previous
//! screen had Hold/Retrieve buttons wired to console stubs; this store is
//! the real contract.
//!
//! Best-effort in-memory persistence for the session. Durability beyond the
//! session is a non-goal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use billdesk_core::{Cart, Money};

/// A parked cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeldBill {
    pub id: Uuid,
    pub held_at: DateTime<Utc>,
    pub cart: Cart,
}

/// Listing row for the retrieve picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeldBillSummary {
    pub id: Uuid,
    pub held_at: DateTime<Utc>,
    pub bill_number: String,
    pub line_count: usize,
    pub net_amount: Money,
}

/// In-memory held-bill store, keyed by generated uuid.
#[derive(Debug, Default)]
pub struct HeldBillStore {
    bills: Vec<HeldBill>,
}

impl HeldBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a cart snapshot and returns its key.
    pub fn hold(&mut self, cart: Cart, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.bills.push(HeldBill {
            id,
            held_at: now,
            cart,
        });
        id
    }

    /// Removes and returns the snapshot with the given id.
    pub fn take(&mut self, id: Uuid) -> Option<Cart> {
        let idx = self.bills.iter().position(|b| b.id == id)?;
        Some(self.bills.remove(idx).cart)
    }

    /// Removes and returns the most recently held snapshot.
    pub fn take_last(&mut self) -> Option<Cart> {
        self.bills.pop().map(|b| b.cart)
    }

    /// Summaries in last-in-first-out display order.
    pub fn summaries(&self) -> Vec<HeldBillSummary> {
        self.bills
            .iter()
            .rev()
            .map(|b| HeldBillSummary {
                id: b.id,
                held_at: b.held_at,
                bill_number: b.cart.bill_number().to_string(),
                line_count: b.cart.line_count(),
                net_amount: b.cart.totals().net_amount,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_core::BillKind;

    fn cart(number: &str) -> Cart {
        Cart::new(BillKind::TaxInvoice, number.to_string())
    }

    #[test]
    fn test_hold_and_take_by_id() {
        let mut store = HeldBillStore::new();
        let id = store.hold(cart("INV2600001"), Utc::now());

        assert_eq!(store.len(), 1);
        let recalled = store.take(id).unwrap();
        assert_eq!(recalled.bill_number(), "INV2600001");
        assert!(store.is_empty());
    }

    #[test]
    fn test_take_unknown_id_is_none() {
        let mut store = HeldBillStore::new();
        store.hold(cart("INV2600001"), Utc::now());
        assert!(store.take(Uuid::new_v4()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_summaries_are_lifo() {
        let mut store = HeldBillStore::new();
        store.hold(cart("INV2600001"), Utc::now());
        store.hold(cart("INV2600002"), Utc::now());

        let summaries = store.summaries();
        assert_eq!(summaries[0].bill_number, "INV2600002");
        assert_eq!(summaries[1].bill_number, "INV2600001");
    }

    #[test]
    fn test_take_last() {
        let mut store = HeldBillStore::new();
        store.hold(cart("INV2600001"), Utc::now());
        store.hold(cart("INV2600002"), Utc::now());

        assert_eq!(store.take_last().unwrap().bill_number(), "INV2600002");
        assert_eq!(store.take_last().unwrap().bill_number(), "INV2600001");
        assert!(store.take_last().is_none());
    }
}
