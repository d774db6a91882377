//! # Command Set
//!
//! Every discrete thing an operator can do to the billing session. A shell
//! translates clicks and keystrokes into these; the session interprets them
//! one at a time, in arrival order.
//!
//! Numeric edits (`SetQuantity`, `SetRate`, `SetDiscount`) carry the raw
//! field text: the lenient coercion rules (malformed → 0, negative discount
//! → 0) are dispatcher behavior, not something each shell re-implements.

use uuid::Uuid;

use billdesk_core::{BillKind, CustomerRef};

/// A billing command.
#[derive(Debug, Clone)]
pub enum Command {
    /// The item entry field changed. Short queries hide results; queries
    /// longer than the threshold hit the lookup gateway; the literal save
    /// alias ("0") saves the bill instead.
    Search(String),

    /// Click on result row `index` in the visible result list.
    SelectResult(usize),

    /// Enter: select the highlighted result row.
    SelectHighlighted,

    /// Arrow keys: move the result highlight, bounded at both ends.
    MoveSelection(SelectionMove),

    /// Edit a line's quantity field (raw text; qty ≤ 0 removes the line).
    SetQuantity { catalog_id: String, input: String },

    /// Edit a line's rate field (raw text; negative is rejected).
    SetRate { catalog_id: String, input: String },

    /// Edit the bill discount field (raw text; negative clamps to 0).
    SetDiscount { input: String },

    /// Replace the customer reference.
    SetCustomer(Option<CustomerRef>),

    /// Switch bill kind; regenerates the bill number.
    SetBillKind(BillKind),

    /// F2: submit the bill, then reset the cart.
    Save,

    /// F3: build a print-ready snapshot and open the preview.
    Print,

    /// Close the print preview.
    ClosePreview,

    /// F4: park the current cart in the held-bill list (cart unchanged).
    Hold,

    /// Recall a held bill by id, replacing the current cart.
    Retrieve(Uuid),

    /// F5: recall the most recently held bill.
    RetrieveLast,

    /// Escape: clear entry input and result list without touching the cart.
    CancelSearch,
}

/// Direction for result-list navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMove {
    Up,
    Down,
}
