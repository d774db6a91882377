//! # Domain Types
//!
//! Core domain types used throughout Billdesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    BillKind     │   │   CustomerRef   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  catalog_id     │   │  TaxInvoice     │   │  phone          │       │
//! │  │  code, name     │   │  SaleChallan    │   │  name           │       │
//! │  │  selling_price  │   │  Quotation      │   └─────────────────┘       │
//! │  │  reference_price│   │  Purchase       │                             │
//! │  │  tax_rate       │   └─────────────────┘   ┌─────────────────┐       │
//! │  │  current_stock  │                         │    TaxRate      │       │
//! │  └─────────────────┘   owned by the catalog  │  bps (u32)      │       │
//! │   (inventory system);  referenced here       │  1800 = 18%     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (a common GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Bill Kind
// =============================================================================

/// The kind of bill being composed.
///
/// Wire names match the backend billing API (`bill_type` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillKind {
    /// Tax invoice with GST breakup.
    #[serde(rename = "gst_invoice")]
    TaxInvoice,
    /// Delivery challan for goods sent without an invoice.
    SaleChallan,
    /// Non-binding price quotation.
    Quotation,
    /// Inward purchase entry.
    Purchase,
}

impl BillKind {
    /// Bill-number prefix for this kind.
    pub const fn prefix(&self) -> &'static str {
        match self {
            BillKind::TaxInvoice => "INV",
            BillKind::SaleChallan => "SC",
            BillKind::Quotation => "QT",
            BillKind::Purchase => "PUR",
        }
    }
}

impl Default for BillKind {
    fn default() -> Self {
        BillKind::TaxInvoice
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An inventory record as returned by the item lookup gateway.
///
/// Owned by the external inventory system; the cart snapshots the fields it
/// needs at add-time and never writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque catalog identifier. Uniqueness key inside a cart.
    pub catalog_id: String,

    /// Item code shown in the entry grid (business identifier).
    pub code: String,

    /// Display name shown to the operator and on the bill.
    pub name: String,

    /// Current selling price. Becomes the line's initial unit rate.
    pub selling_price: Money,

    /// Printed MRP. Display-only on the bill.
    pub reference_price: Money,

    /// GST rate for this item.
    pub tax_rate: TaxRate,

    /// Stock on hand at lookup time (informational).
    pub current_stock: i64,
}

// =============================================================================
// Customer Reference
// =============================================================================

/// Free-form customer reference attached to a bill.
/// No uniqueness or lookup is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerRef {
    pub phone: String,
    pub name: String,
}

// =============================================================================
// Payment
// =============================================================================

/// How the bill is settled. Wire names match the backend billing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Credit,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// Settlement status submitted with the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Paid
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(18.0).bps(), 1800);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_bill_kind_prefixes() {
        assert_eq!(BillKind::TaxInvoice.prefix(), "INV");
        assert_eq!(BillKind::SaleChallan.prefix(), "SC");
        assert_eq!(BillKind::Quotation.prefix(), "QT");
        assert_eq!(BillKind::Purchase.prefix(), "PUR");
    }

    #[test]
    fn test_bill_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&BillKind::TaxInvoice).unwrap(),
            "\"gst_invoice\""
        );
        assert_eq!(
            serde_json::to_string(&BillKind::SaleChallan).unwrap(),
            "\"sale_challan\""
        );
    }

    #[test]
    fn test_payment_defaults() {
        // The billing screen submits cash/paid unless the operator changes it
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Paid);
    }
}
