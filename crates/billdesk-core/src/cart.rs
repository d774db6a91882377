//! # Cart State
//!
//! The authoritative in-memory representation of the bill under composition.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Invariants                                  │
//! │                                                                         │
//! │  1. Lines are unique by catalog_id; re-adding increments quantity       │
//! │  2. A line's quantity is always > 0; setting qty ≤ 0 removes the line   │
//! │  3. line_amount is DERIVED (qty × rate) - never stored independently    │
//! │  4. Cached totals are recomputed exactly once per successful mutation,  │
//! │     before control returns to the caller - they are never stale         │
//! │  5. net = subtotal + tax − discount, NOT clamped at zero                │
//! │                                                                         │
//! │  (5) is deliberate: whether a discount may push a bill negative is a    │
//! │  business decision made upstream, not silently by the cart.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutation goes through the operations on [`Cart`]; callers only ever
//! see read-only snapshots.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quantity::Qty;
use crate::types::{BillKind, CatalogItem, CustomerRef, TaxRate};
use crate::MAX_CART_LINES;

// =============================================================================
// Line Item
// =============================================================================

/// One catalog item entry within the cart.
///
/// ## Snapshot Pattern
/// `code`, `name`, `reference_price` and `tax_rate` are frozen copies taken
/// when the item is added. If the catalog changes afterwards, this bill keeps
/// displaying what the operator saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog identifier (uniqueness key inside the cart).
    pub catalog_id: String,

    /// Item code at add-time (frozen).
    pub code: String,

    /// Display name at add-time (frozen).
    pub name: String,

    /// Quantity on this line. Always positive while the line exists.
    pub quantity: Qty,

    /// Unit rate. Starts at the catalog selling price, editable per line.
    pub unit_rate: Money,

    /// Printed MRP at add-time (frozen, display-only).
    pub reference_price: Money,

    /// GST rate at add-time (frozen).
    pub tax_rate: TaxRate,
}

impl LineItem {
    /// Creates a line from a catalog item with quantity 1.
    fn from_catalog(item: &CatalogItem) -> Self {
        LineItem {
            catalog_id: item.catalog_id.clone(),
            code: item.code.clone(),
            name: item.name.clone(),
            quantity: Qty::ONE,
            unit_rate: item.selling_price,
            reference_price: item.reference_price,
            tax_rate: item.tax_rate,
        }
    }

    /// The line amount: `quantity × unit_rate`. Always derived.
    pub fn line_amount(&self) -> Money {
        self.unit_rate.times_qty(self.quantity)
    }

    /// GST for this line, computed on the line amount (not the aggregate,
    /// so mixed-rate carts don't accumulate rounding drift).
    pub fn line_tax(&self) -> Money {
        self.line_amount().line_tax(self.tax_rate)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals snapshot. Always a pure function of lines + discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub discount_amount: Money,
    pub net_amount: Money,
}

impl Totals {
    /// The pricing calculator.
    ///
    /// - `subtotal = Σ line_amount`
    /// - `tax = Σ line_tax` (per line, see [`LineItem::line_tax`])
    /// - `net = subtotal + tax − discount` (may be negative)
    pub fn compute(lines: &[LineItem], discount: Money) -> Totals {
        let mut subtotal = Money::zero();
        let mut tax_amount = Money::zero();

        for line in lines {
            subtotal += line.line_amount();
            tax_amount += line.line_tax();
        }

        Totals {
            subtotal,
            tax_amount,
            discount_amount: discount,
            net_amount: subtotal + tax_amount - discount,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The bill under composition.
///
/// Lifecycle: created empty when a billing session starts, mutated only
/// through the methods below, reset (with a fresh bill number) after a
/// successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Kind of bill being composed.
    bill_kind: BillKind,

    /// Generated bill number (e.g. `INV2600042`).
    bill_number: String,

    /// Optional customer reference.
    customer: Option<CustomerRef>,

    /// Lines in insertion order (= display order).
    lines: Vec<LineItem>,

    /// Flat bill-level discount, independent of tax.
    discount: Money,

    /// Cached totals; refreshed by every successful mutation.
    totals: Totals,
}

impl Cart {
    /// Creates an empty cart with the given bill number.
    pub fn new(bill_kind: BillKind, bill_number: String) -> Self {
        Cart {
            bill_kind,
            bill_number,
            customer: None,
            lines: Vec::new(),
            discount: Money::zero(),
            totals: Totals::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Read-only accessors
    // -------------------------------------------------------------------------

    pub fn bill_kind(&self) -> BillKind {
        self.bill_kind
    }

    pub fn bill_number(&self) -> &str {
        &self.bill_number
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// The cached totals snapshot. Never stale relative to lines/discount.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a catalog item, or increments its quantity by one if a line with
    /// the same `catalog_id` already exists.
    ///
    /// Idempotent in identity: selecting the same item twice yields one line
    /// with quantity 2, never two lines.
    pub fn add_or_increment(&mut self, item: &CatalogItem) -> CoreResult<()> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.catalog_id == item.catalog_id)
        {
            line.quantity = line.quantity.plus_one();
            self.recompute();
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(LineItem::from_catalog(item));
        self.recompute();
        Ok(())
    }

    /// Sets the quantity of a line. A quantity of zero (or less) removes the
    /// line - a zero-quantity line cannot exist in the cart.
    pub fn set_quantity(&mut self, catalog_id: &str, quantity: Qty) -> CoreResult<()> {
        if !quantity.is_positive() {
            return self.remove_line(catalog_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.catalog_id == catalog_id)
            .ok_or_else(|| CoreError::LineNotFound(catalog_id.to_string()))?;

        line.quantity = quantity;
        self.recompute();
        Ok(())
    }

    /// Sets the unit rate of a line. Rejects negative rates and leaves the
    /// line untouched.
    pub fn set_rate(&mut self, catalog_id: &str, rate: Money) -> CoreResult<()> {
        if rate.is_negative() {
            return Err(CoreError::InvalidValue {
                field: "rate",
                value: rate.to_string(),
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.catalog_id == catalog_id)
            .ok_or_else(|| CoreError::LineNotFound(catalog_id.to_string()))?;

        line.unit_rate = rate;
        self.recompute();
        Ok(())
    }

    /// Removes a line by catalog id.
    pub fn remove_line(&mut self, catalog_id: &str) -> CoreResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.catalog_id != catalog_id);

        if self.lines.len() == before {
            return Err(CoreError::LineNotFound(catalog_id.to_string()));
        }

        self.recompute();
        Ok(())
    }

    /// Sets the bill-level discount. Rejects negative amounts.
    pub fn set_discount(&mut self, amount: Money) -> CoreResult<()> {
        if amount.is_negative() {
            return Err(CoreError::InvalidValue {
                field: "discount",
                value: amount.to_string(),
            });
        }

        self.discount = amount;
        self.recompute();
        Ok(())
    }

    /// Replaces the customer reference unconditionally.
    pub fn set_customer(&mut self, customer: Option<CustomerRef>) {
        self.customer = customer;
    }

    /// Changes the bill kind, installing the freshly generated number for
    /// the new kind. Lines and discount are kept.
    pub fn set_bill_kind(&mut self, kind: BillKind, new_number: String) {
        self.bill_kind = kind;
        self.bill_number = new_number;
    }

    /// Clears lines, customer and discount, installing a fresh bill number.
    /// Called after a successful save or an explicit cancel.
    pub fn reset(&mut self, new_number: String) {
        self.lines.clear();
        self.customer = None;
        self.discount = Money::zero();
        self.bill_number = new_number;
        self.recompute();
    }

    /// Refreshes the cached totals. Every mutation path calls this exactly
    /// once before returning.
    fn recompute(&mut self) {
        self.totals = Totals::compute(&self.lines, self.discount);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_item(id: &str, price_paise: i64, tax_bps: u32) -> CatalogItem {
        CatalogItem {
            catalog_id: id.to_string(),
            code: format!("ITM-{}", id),
            name: format!("Item {}", id),
            selling_price: Money::from_paise(price_paise),
            reference_price: Money::from_paise(price_paise + 500),
            tax_rate: TaxRate::from_bps(tax_bps),
            current_stock: 50,
        }
    }

    fn cart() -> Cart {
        Cart::new(BillKind::TaxInvoice, "INV2600001".to_string())
    }

    #[test]
    fn test_add_creates_line_with_qty_one() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.quantity, Qty::ONE);
        assert_eq!(line.unit_rate, Money::from_paise(999));
        assert_eq!(line.line_amount(), Money::from_paise(999));
    }

    #[test]
    fn test_add_same_item_increments_not_duplicates() {
        let mut cart = cart();
        let item = catalog_item("1", 999, 1800);

        cart.add_or_increment(&item).unwrap();
        cart.add_or_increment(&item).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, Qty::from_units(2));
    }

    #[test]
    fn test_billing_scenario_totals() {
        // One line: qty 2 × ₹100.00 at 18% GST, ₹10.00 discount
        // subtotal ₹200.00, tax ₹36.00, net ₹226.00
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 10000, 1800)).unwrap();
        cart.set_quantity("1", Qty::from_units(2)).unwrap();
        cart.set_discount(Money::from_paise(1000)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Money::from_paise(20000));
        assert_eq!(totals.tax_amount, Money::from_paise(3600));
        assert_eq!(totals.discount_amount, Money::from_paise(1000));
        assert_eq!(totals.net_amount, Money::from_paise(22600));
    }

    #[test]
    fn test_totals_never_stale_after_mutations() {
        let mut cart = cart();
        let item = catalog_item("1", 5000, 500);
        cart.add_or_increment(&item).unwrap();
        assert_eq!(cart.totals().subtotal, Money::from_paise(5000));

        cart.set_rate("1", Money::from_paise(6000)).unwrap();
        assert_eq!(cart.totals().subtotal, Money::from_paise(6000));

        cart.set_quantity("1", Qty::from_units(3)).unwrap();
        assert_eq!(cart.totals().subtotal, Money::from_paise(18000));

        // Identity: subtotal == Σ line_amount, tax == Σ line_tax
        let sum: i64 = cart.lines().iter().map(|l| l.line_amount().paise()).sum();
        assert_eq!(cart.totals().subtotal.paise(), sum);
    }

    #[test]
    fn test_mixed_rate_tax_is_per_line() {
        let mut cart = cart();
        // ₹10.00 at 8.25% → 83p; ₹10.00 at 5% → 50p
        cart.add_or_increment(&catalog_item("a", 1000, 825)).unwrap();
        cart.add_or_increment(&catalog_item("b", 1000, 500)).unwrap();

        assert_eq!(cart.totals().tax_amount, Money::from_paise(133));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();
        cart.add_or_increment(&catalog_item("2", 500, 1800)).unwrap();

        cart.set_quantity("1", Qty::zero()).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].catalog_id, "2");
        assert_eq!(cart.totals().subtotal, Money::from_paise(500));
    }

    #[test]
    fn test_set_quantity_unknown_line_is_explicit_error() {
        let mut cart = cart();
        let err = cart.set_quantity("ghost", Qty::ONE).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound(_)));
    }

    #[test]
    fn test_set_rate_negative_rejected_line_unchanged() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();

        let err = cart.set_rate("1", Money::from_paise(-500)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidValue { field: "rate", .. }));
        assert_eq!(cart.lines()[0].unit_rate, Money::from_paise(999));
    }

    #[test]
    fn test_set_rate_independent_of_catalog_price() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();

        cart.set_rate("1", Money::from_paise(850)).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.unit_rate, Money::from_paise(850));
        // MRP snapshot untouched
        assert_eq!(line.reference_price, Money::from_paise(1499));
    }

    #[test]
    fn test_negative_discount_rejected() {
        let mut cart = cart();
        let err = cart.set_discount(Money::from_paise(-100)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidValue { field: "discount", .. }
        ));
    }

    #[test]
    fn test_net_amount_not_clamped_at_zero() {
        // Discount larger than the bill: net goes negative and stays there
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 1000, 0)).unwrap();
        cart.set_discount(Money::from_paise(5000)).unwrap();

        assert_eq!(cart.totals().net_amount, Money::from_paise(-4000));
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = cart();
        for i in 0..MAX_CART_LINES {
            cart.add_or_increment(&catalog_item(&i.to_string(), 100, 0))
                .unwrap();
        }

        let err = cart
            .add_or_increment(&catalog_item("overflow", 100, 0))
            .unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));

        // Incrementing an existing line is still fine at the limit
        cart.add_or_increment(&catalog_item("0", 100, 0)).unwrap();
        assert_eq!(cart.line_count(), MAX_CART_LINES);
    }

    #[test]
    fn test_reset_clears_everything_and_renumbers() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();
        cart.set_customer(Some(CustomerRef {
            phone: "9876543210".to_string(),
            name: "Walk-in".to_string(),
        }));
        cart.set_discount(Money::from_paise(100)).unwrap();

        cart.reset("INV2600002".to_string());

        assert!(cart.is_empty());
        assert!(cart.customer().is_none());
        assert_eq!(cart.discount(), Money::zero());
        assert_eq!(cart.bill_number(), "INV2600002");
        assert_eq!(cart.totals(), Totals::default());
    }

    #[test]
    fn test_set_bill_kind_keeps_lines() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 999, 1800)).unwrap();

        cart.set_bill_kind(BillKind::Quotation, "QT2600001".to_string());

        assert_eq!(cart.bill_kind(), BillKind::Quotation);
        assert_eq!(cart.bill_number(), "QT2600001");
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_fractional_quantity_line_amount() {
        let mut cart = cart();
        cart.add_or_increment(&catalog_item("1", 1099, 0)).unwrap();
        cart.set_quantity("1", Qty::from_thousandths(1500)).unwrap();

        // 1.5 × ₹10.99 = ₹16.485 → ₹16.49
        assert_eq!(cart.lines()[0].line_amount(), Money::from_paise(1649));
        assert_eq!(cart.totals().subtotal, Money::from_paise(1649));
    }
}
