//! # billdesk-engine: The Billing Command Dispatcher
//!
//! Turns operator commands into cart mutations, gateway calls and view-state
//! transitions, with one hard rule: **one session, one queue, one command at
//! a time**. Cart operations are not commutative (two concurrent adds of the
//! same item must not both append), so every input source - keyboard
//! handler, click handler, lookup callback - goes through the same
//! single-consumer queue instead of sharing the cart.
//!
//! ## Modules
//!
//! - [`command`] - The command set (what an operator can do)
//! - [`session`] - The interpreter: cart + view state machine + held bills
//! - [`engine`] - Async wrapper: serialized queue, lookups, submission
//! - [`gateway`] - Consumed external services (item lookup, bill submission)
//! - [`held`] - Held-bill store (park a cart, recall it later)
//! - [`print`] - Print-ready bill snapshot
//! - [`keys`] - Function-key command surface
//! - [`error`] - Engine error taxonomy
//!
//! ## Quick Tour
//! ```rust,no_run
//! use std::sync::Arc;
//! use billdesk_engine::{BillingEngine, Command, EngineConfig};
//! # use billdesk_engine::gateway::{ItemLookup, BillSubmitter};
//! # async fn demo(lookup: Arc<dyn ItemLookup>, submitter: Arc<dyn BillSubmitter>) {
//! let handle = BillingEngine::spawn(lookup, submitter, EngineConfig::default());
//!
//! // Typing in the entry field
//! handle.dispatch(Command::Search("rice".into())).await.unwrap();
//! // ... results arrive asynchronously; Enter picks the highlighted one
//! handle.dispatch(Command::SelectHighlighted).await.unwrap();
//! // F2
//! let view = handle.dispatch(Command::Save).await.unwrap();
//! assert!(view.cart.is_empty());
//! # }
//! ```

pub mod command;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod held;
pub mod keys;
pub mod print;
pub mod session;

pub use command::{Command, SelectionMove};
pub use engine::{BillingEngine, EngineConfig, EngineHandle};
pub use error::{EngineError, EngineResult};
pub use gateway::{BillConfirmation, BillPayload, BillSubmitter, GatewayError, ItemLookup};
pub use held::{HeldBill, HeldBillSummary};
pub use keys::{command_for, Key};
pub use print::{PrintLine, PrintView};
pub use session::{Effect, Session, SessionView, ViewState};
