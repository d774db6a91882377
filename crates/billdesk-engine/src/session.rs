//! # Billing Session
//!
//! The command interpreter at the center of the engine. One `Session` is one
//! bill being composed at one counter.
//!
//! ## View State Machine
//! The previous billing screen encoded search/preview visibility as
//! scattered booleans (`showItemSearch`, `showPrintPreview`); here it is one
//! explicit state with commands as transitions:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session View States                                │
//! │                                                                         │
//! │             Search(len>2)          results arrive (fresh seq)           │
//! │   ┌──────┐ ─────────────► ┌───────────┐ ─────────► ┌────────────────┐  │
//! │   │ Idle │                │ Searching │            │ ResultsVisible │  │
//! │   └──────┘ ◄───────────── └───────────┘            └───────┬────────┘  │
//! │      ▲      short query /      │                           │            │
//! │      │      CancelSearch       │ empty / failed lookup     │            │
//! │      │                         └────────────────► Idle     │            │
//! │      │                                                     │            │
//! │      │  ClosePreview / CancelSearch         SelectResult   │            │
//! │      │ ┌──────────────┐                     (adds to cart, │            │
//! │      └─│ PrintPreview │ ◄── Print           back to Idle) ◄┘            │
//! │        └──────────────┘                                                 │
//! │                                                                         │
//! │  Stale search completions (older seq) are dropped: last write wins.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Guarantee
//! The session is synchronous and single-owner. Every mutating command
//! recomputes the cart totals exactly once before `dispatch` returns (the
//! cart enforces this), so a caller never observes stale totals.
//!
//! Commands whose work is remote (`Search`, `Save`) return an [`Effect`] for
//! the async engine loop to perform; the session itself never does I/O.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use billdesk_core::{
    input, BillNumberGenerator, Cart, CatalogItem, PaymentMethod, PaymentStatus,
    SAVE_ALIAS_QUERY, SEARCH_MIN_QUERY_LEN,
};

use crate::command::{Command, SelectionMove};
use crate::error::{EngineError, EngineResult};
use crate::gateway::{BillPayload, GatewayError};
use crate::held::{HeldBillStore, HeldBillSummary};
use crate::print::PrintView;

// =============================================================================
// View State
// =============================================================================

/// What the billing screen is showing, as one explicit state.
#[derive(Debug, Clone, Serialize)]
pub enum ViewState {
    /// Entry field focused, no overlay.
    Idle,

    /// A lookup with this sequence number is in flight.
    Searching { seq: u64 },

    /// Result list is visible with a bounded highlight.
    ResultsVisible {
        results: Vec<CatalogItem>,
        selected: usize,
    },

    /// Print preview overlay is open.
    PrintPreview(PrintView),
}

// =============================================================================
// Effect
// =============================================================================

/// Remote work a command asks the engine loop to perform.
#[derive(Debug)]
pub enum Effect {
    /// Nothing remote; the command completed in-session.
    None,

    /// Issue an item lookup tagged with `seq`. The completion must be fed
    /// back through [`Session::search_completed`].
    IssueSearch { seq: u64, query: String },

    /// Submit this bill. On confirmation call [`Session::save_succeeded`];
    /// on failure surface the error and leave the session as-is.
    SubmitBill(BillPayload),
}

// =============================================================================
// Session View
// =============================================================================

/// Read-only snapshot handed to shells after each command.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub cart: Cart,
    pub entry_input: String,
    pub view: ViewState,
    pub held_bills: Vec<HeldBillSummary>,
}

// =============================================================================
// Session
// =============================================================================

/// A single billing session: cart, held bills, view state, bill numbering.
///
/// Not `Sync` by design - exactly one owner processes commands, in order.
/// Concurrent shells go through the engine's command queue.
#[derive(Debug)]
pub struct Session {
    cart: Cart,
    numbers: BillNumberGenerator,
    held: HeldBillStore,
    view: ViewState,
    entry_input: String,

    /// Monotonic tag for lookups; only the completion matching
    /// `active_search` may touch the result list.
    next_seq: u64,
    active_search: Option<u64>,

    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
}

impl Session {
    /// Starts an empty session, minting the first bill number.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut numbers = BillNumberGenerator::new();
        let kind = Default::default();
        let bill_number = numbers.next_for(kind, now.date_naive());

        Session {
            cart: Cart::new(kind, bill_number),
            numbers,
            held: HeldBillStore::new(),
            view: ViewState::Idle,
            entry_input: String::new(),
            next_seq: 0,
            active_search: None,
            payment_method: PaymentMethod::default(),
            payment_status: PaymentStatus::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn entry_input(&self) -> &str {
        &self.entry_input
    }

    pub fn held_bills(&self) -> Vec<HeldBillSummary> {
        self.held.summaries()
    }

    /// Full snapshot for a shell.
    pub fn view(&self) -> SessionView {
        SessionView {
            cart: self.cart.clone(),
            entry_input: self.entry_input.clone(),
            view: self.view.clone(),
            held_bills: self.held.summaries(),
        }
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Interprets one command. Returns the remote work (if any) the caller
    /// must perform.
    pub fn dispatch(&mut self, command: Command, now: DateTime<Utc>) -> EngineResult<Effect> {
        match command {
            Command::Search(query) => self.on_search(query),

            Command::SelectResult(index) => self.on_select(Some(index)),

            Command::SelectHighlighted => self.on_select(None),

            Command::MoveSelection(direction) => {
                if let ViewState::ResultsVisible { results, selected } = &mut self.view {
                    *selected = match direction {
                        SelectionMove::Down => (*selected + 1).min(results.len() - 1),
                        SelectionMove::Up => selected.saturating_sub(1),
                    };
                }
                Ok(Effect::None)
            }

            Command::SetQuantity { catalog_id, input } => {
                let qty = input::parse_qty(&input);
                debug!(catalog_id = %catalog_id, qty = %qty, "set quantity");
                self.cart.set_quantity(&catalog_id, qty)?;
                Ok(Effect::None)
            }

            Command::SetRate { catalog_id, input } => {
                let rate = input::parse_rate(&input);
                debug!(catalog_id = %catalog_id, rate = %rate, "set rate");
                self.cart.set_rate(&catalog_id, rate)?;
                Ok(Effect::None)
            }

            Command::SetDiscount { input } => {
                self.cart.set_discount(input::parse_discount(&input))?;
                Ok(Effect::None)
            }

            Command::SetCustomer(customer) => {
                self.cart.set_customer(customer);
                Ok(Effect::None)
            }

            Command::SetBillKind(kind) => {
                if kind != self.cart.bill_kind() {
                    let number = self.numbers.next_for(kind, now.date_naive());
                    debug!(kind = ?kind, number = %number, "bill kind changed");
                    self.cart.set_bill_kind(kind, number);
                }
                Ok(Effect::None)
            }

            Command::Save => self.begin_save(),

            Command::Print => {
                if self.cart.is_empty() {
                    return Err(billdesk_core::CoreError::EmptyCart.into());
                }
                self.view =
                    ViewState::PrintPreview(PrintView::from_cart(&self.cart, now.date_naive()));
                Ok(Effect::None)
            }

            Command::ClosePreview => {
                if matches!(self.view, ViewState::PrintPreview(_)) {
                    self.view = ViewState::Idle;
                }
                Ok(Effect::None)
            }

            Command::Hold => {
                if self.cart.is_empty() {
                    return Err(billdesk_core::CoreError::EmptyCart.into());
                }
                let id = self.held.hold(self.cart.clone(), now);
                info!(held_id = %id, bill_number = %self.cart.bill_number(), "bill held");
                Ok(Effect::None)
            }

            Command::Retrieve(id) => {
                let cart = self
                    .held
                    .take(id)
                    .ok_or(EngineError::HeldBillNotFound(id))?;
                self.install_retrieved(cart);
                Ok(Effect::None)
            }

            Command::RetrieveLast => {
                let cart = self.held.take_last().ok_or(EngineError::NoHeldBills)?;
                self.install_retrieved(cart);
                Ok(Effect::None)
            }

            Command::CancelSearch => {
                self.entry_input.clear();
                self.active_search = None;
                self.view = ViewState::Idle;
                Ok(Effect::None)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Search flow
    // -------------------------------------------------------------------------

    fn on_search(&mut self, query: String) -> EngineResult<Effect> {
        self.entry_input = query.clone();

        // Counter shorthand: typing "0" in the entry field saves the bill.
        if query == SAVE_ALIAS_QUERY {
            return self.begin_save();
        }

        if query.chars().count() <= SEARCH_MIN_QUERY_LEN {
            // Too short to be useful; hide results, call nothing.
            self.active_search = None;
            self.view = ViewState::Idle;
            return Ok(Effect::None);
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.active_search = Some(seq);
        self.view = ViewState::Searching { seq };
        debug!(seq, query = %query, "issuing item lookup");
        Ok(Effect::IssueSearch { seq, query })
    }

    /// Feeds a lookup completion back into the session.
    ///
    /// Completions carrying a sequence number other than the active one are
    /// stale (a fresher query superseded them) and are dropped. A gateway
    /// failure degrades to an empty result set; it never crashes the
    /// session.
    pub fn search_completed(&mut self, seq: u64, result: Result<Vec<CatalogItem>, GatewayError>) {
        if self.active_search != Some(seq) {
            debug!(seq, "dropping stale lookup completion");
            return;
        }
        self.active_search = None;

        match result {
            Ok(results) if !results.is_empty() => {
                debug!(seq, count = results.len(), "lookup results visible");
                self.view = ViewState::ResultsVisible {
                    results,
                    selected: 0,
                };
            }
            Ok(_) => {
                self.view = ViewState::Idle;
            }
            Err(err) => {
                warn!(seq, error = %err, "item lookup failed; surfacing empty results");
                self.view = ViewState::Idle;
            }
        }
    }

    /// Adds the clicked (`Some(index)`) or highlighted (`None`) result to the
    /// cart. No-op outside `ResultsVisible` or for an out-of-range index.
    fn on_select(&mut self, index: Option<usize>) -> EngineResult<Effect> {
        let item = match &self.view {
            ViewState::ResultsVisible { results, selected } => {
                results.get(index.unwrap_or(*selected)).cloned()
            }
            _ => None,
        };

        if let Some(item) = item {
            self.cart.add_or_increment(&item)?;
            self.entry_input.clear();
            self.active_search = None;
            self.view = ViewState::Idle;
        }
        Ok(Effect::None)
    }

    // -------------------------------------------------------------------------
    // Save flow
    // -------------------------------------------------------------------------

    fn begin_save(&mut self) -> EngineResult<Effect> {
        if self.cart.is_empty() {
            return Err(billdesk_core::CoreError::EmptyCart.into());
        }

        let payload =
            BillPayload::from_cart(&self.cart, self.payment_method, self.payment_status);
        debug!(bill_number = %self.cart.bill_number(), lines = payload.items.len(), "submitting bill");
        Ok(Effect::SubmitBill(payload))
    }

    /// Called by the engine loop once the backend confirms the submission.
    /// Resets the cart and mints the next bill number. On submission failure
    /// this is NOT called, so the cart stays intact for a retry.
    pub fn save_succeeded(&mut self, reference: &str, now: DateTime<Utc>) {
        info!(
            bill_number = %self.cart.bill_number(),
            reference = %reference,
            net = %self.cart.totals().net_amount,
            "bill saved"
        );
        let number = self
            .numbers
            .next_for(self.cart.bill_kind(), now.date_naive());
        self.cart.reset(number);
        self.entry_input.clear();
        self.active_search = None;
        self.view = ViewState::Idle;
    }

    fn install_retrieved(&mut self, cart: Cart) {
        info!(bill_number = %cart.bill_number(), "held bill retrieved");
        self.cart = cart;
        self.entry_input.clear();
        self.active_search = None;
        self.view = ViewState::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
