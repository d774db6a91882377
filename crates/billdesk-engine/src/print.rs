//! # Print View
//!
//! A print-ready snapshot of the bill. Rendering (receipt layout, paper
//! formats) belongs to the shell; this is the data it renders from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use billdesk_core::{BillKind, Cart, CustomerRef, Money, Qty, Totals};

/// Everything a bill printout needs, frozen at print time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintView {
    pub bill_number: String,
    pub bill_kind: BillKind,
    pub date: NaiveDate,
    pub customer: Option<CustomerRef>,
    pub lines: Vec<PrintLine>,
    pub totals: Totals,
}

/// One printed line row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintLine {
    pub code: String,
    pub name: String,
    pub quantity: Qty,
    pub unit_rate: Money,
    pub reference_price: Money,
    pub tax_percentage: f64,
    pub amount: Money,
}

impl PrintView {
    pub fn from_cart(cart: &Cart, date: NaiveDate) -> Self {
        PrintView {
            bill_number: cart.bill_number().to_string(),
            bill_kind: cart.bill_kind(),
            date,
            customer: cart.customer().cloned(),
            lines: cart
                .lines()
                .iter()
                .map(|line| PrintLine {
                    code: line.code.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_rate: line.unit_rate,
                    reference_price: line.reference_price,
                    tax_percentage: line.tax_rate.percentage(),
                    amount: line.line_amount(),
                })
                .collect(),
            totals: cart.totals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billdesk_core::{CatalogItem, TaxRate};

    #[test]
    fn test_print_view_freezes_cart() {
        let mut cart = Cart::new(BillKind::TaxInvoice, "INV2600007".to_string());
        cart.add_or_increment(&CatalogItem {
            catalog_id: "c-1".to_string(),
            code: "SUGAR-1KG".to_string(),
            name: "Sugar 1kg".to_string(),
            selling_price: Money::from_paise(4500),
            reference_price: Money::from_paise(5000),
            tax_rate: TaxRate::from_bps(500),
            current_stock: 8,
        })
        .unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        let view = PrintView::from_cart(&cart, date);

        assert_eq!(view.bill_number, "INV2600007");
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].amount, Money::from_paise(4500));
        assert_eq!(view.totals, cart.totals());

        // Mutating the cart afterwards does not touch the snapshot
        cart.set_rate("c-1", Money::from_paise(4000)).unwrap();
        assert_eq!(view.lines[0].unit_rate, Money::from_paise(4500));
    }
}
