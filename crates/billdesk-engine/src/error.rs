//! # Engine Error Type
//!
//! What the dispatcher surfaces to its caller (a UI shell or a test
//! harness).
//!
//! Propagation rules:
//! - lookup gateway failures are swallowed at the dispatcher boundary and
//!   degrade to an empty result set - they never reach this type
//! - submission failures DO surface (as [`EngineError::Gateway`]) so the
//!   shell can tell the operator to retry; the cart is left untouched
//! - cart errors (`EmptyCart`, `LineNotFound`, ...) surface for user-facing
//!   messaging

use thiserror::Error;
use uuid::Uuid;

use billdesk_core::CoreError;

use crate::gateway::GatewayError;

/// Errors surfaced by the billing engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Cart-level failure (empty cart, unknown line, invalid value).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Retrieve referenced an unknown held-bill id.
    #[error("Held bill not found: {0}")]
    HeldBillNotFound(Uuid),

    /// Retrieve-last with nothing held.
    #[error("No held bills to retrieve")]
    NoHeldBills,

    /// Bill submission failed; the cart is unchanged and may be retried.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The engine task has shut down.
    #[error("Billing engine is closed")]
    Closed,
}

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
