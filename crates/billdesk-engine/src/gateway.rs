//! # External Gateways
//!
//! The engine consumes two remote services and implements neither:
//!
//! - **Item lookup**: resolves a typed query into candidate catalog items.
//! - **Bill submission**: accepts a finished bill and returns an opaque
//!   confirmation.
//!
//! Both are async traits so a deployment can plug in an HTTP client while
//! tests plug in mocks. Gateway failures are *expected* events: the
//! dispatcher degrades a failed lookup to an empty result set and leaves the
//! cart untouched on a failed submission so the operator can retry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use billdesk_core::{
    BillKind, Cart, CatalogItem, CustomerRef, Money, PaymentMethod, PaymentStatus, Qty,
};

// =============================================================================
// Gateway Error
// =============================================================================

/// Transport-level failure talking to a gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Network/transport failure (connection refused, 5xx, ...).
    #[error("Gateway transport error: {0}")]
    Transport(String),

    /// The call exceeded its deadline. Treated like any other failure.
    #[error("Gateway call timed out")]
    Timeout,

    /// The backend understood the request and refused it.
    #[error("Gateway rejected request: {0}")]
    Rejected(String),
}

// =============================================================================
// Item Lookup
// =============================================================================

/// Resolves a typed query into candidate catalog items.
///
/// Implementations must be side-effect free from the cart's point of view:
/// the engine may issue, abandon and repeat lookups freely.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        in_stock_only: bool,
    ) -> Result<Vec<CatalogItem>, GatewayError>;
}

// =============================================================================
// Bill Submission
// =============================================================================

/// Accepts a finished bill.
#[async_trait]
pub trait BillSubmitter: Send + Sync {
    async fn submit(&self, payload: &BillPayload) -> Result<BillConfirmation, GatewayError>;
}

/// Opaque confirmation from the billing backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillConfirmation {
    /// Backend reference for the saved bill (its bill number or record id).
    pub reference: String,
}

// =============================================================================
// Bill Payload
// =============================================================================

/// The bill submission contract.
///
/// Field names are the backend's wire names (`bill_type`, `items[].rate`,
/// `items[].mrp`). Monetary values serialize as integer paise and quantities
/// as integer thousandths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPayload {
    pub bill_type: BillKind,
    pub customer: Option<CustomerRef>,
    pub items: Vec<BillPayloadItem>,
    pub discount_amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
}

/// One cart line on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillPayloadItem {
    pub catalog_id: String,
    pub item_code: String,
    pub quantity: Qty,
    pub rate: Money,
    pub mrp: Money,
}

impl BillPayload {
    /// Serializes a cart for submission. Pure snapshot; the cart itself is
    /// only reset after the backend confirms.
    pub fn from_cart(cart: &Cart, method: PaymentMethod, status: PaymentStatus) -> Self {
        BillPayload {
            bill_type: cart.bill_kind(),
            customer: cart.customer().cloned(),
            items: cart
                .lines()
                .iter()
                .map(|line| BillPayloadItem {
                    catalog_id: line.catalog_id.clone(),
                    item_code: line.code.clone(),
                    quantity: line.quantity,
                    rate: line.unit_rate,
                    mrp: line.reference_price,
                })
                .collect(),
            discount_amount: cart.discount(),
            payment_method: method,
            payment_status: status,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_core::TaxRate;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new(BillKind::TaxInvoice, "INV2600001".to_string());
        cart.add_or_increment(&CatalogItem {
            catalog_id: "c-1".to_string(),
            code: "RICE-5KG".to_string(),
            name: "Basmati Rice 5kg".to_string(),
            selling_price: Money::from_paise(45000),
            reference_price: Money::from_paise(49900),
            tax_rate: TaxRate::from_bps(500),
            current_stock: 12,
        })
        .unwrap();
        cart.set_discount(Money::from_paise(1000)).unwrap();
        cart
    }

    #[test]
    fn test_payload_snapshot_from_cart() {
        let payload = BillPayload::from_cart(
            &sample_cart(),
            PaymentMethod::Cash,
            PaymentStatus::Paid,
        );

        assert_eq!(payload.items.len(), 1);
        let item = &payload.items[0];
        assert_eq!(item.item_code, "RICE-5KG");
        assert_eq!(item.rate, Money::from_paise(45000));
        assert_eq!(item.mrp, Money::from_paise(49900));
        assert_eq!(payload.discount_amount, Money::from_paise(1000));
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = BillPayload::from_cart(
            &sample_cart(),
            PaymentMethod::Cash,
            PaymentStatus::Paid,
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["bill_type"], "gst_invoice");
        assert_eq!(json["payment_method"], "cash");
        assert_eq!(json["payment_status"], "paid");
        assert_eq!(json["items"][0]["item_code"], "RICE-5KG");
        assert_eq!(json["items"][0]["rate"], 45000);
        assert_eq!(json["items"][0]["quantity"], 1000); // thousandths
        assert_eq!(json["discount_amount"], 1000);
    }
}
