//! # billdesk-core: Pure Business Logic for Billdesk
//!
//! This crate is the **heart** of the billing workflow. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Billdesk Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       UI Shell (any toolkit)                    │   │
//! │  │     Entry field ──► Cart grid ──► Totals panel ──► Preview     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / snapshots                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    billdesk-engine                              │   │
//! │  │     serialized command queue, gateways, held bills              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ billdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ quantity │ │   cart   │ │  billnum │          │   │
//! │  │   │  Money   │ │   Qty    │ │   Cart   │ │ numbers  │          │   │
//! │  │   │  TaxCalc │ │          │ │  Totals  │ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`quantity`] - Fixed-point quantities (loose goods sell at 1.5 kg)
//! - [`types`] - Domain types (BillKind, CatalogItem, TaxRate, ...)
//! - [`cart`] - Cart state and the pricing calculator
//! - [`billnum`] - Bill number generation
//! - [`input`] - Lenient numeric input parsing (coerce, don't crash)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; the clock is a parameter
//! 2. **No I/O**: network, file system and timers are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paise (i64), never floats
//! 4. **Explicit Errors**: typed errors, never strings or silent no-ops

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billnum;
pub mod cart;
pub mod error;
pub mod input;
pub mod money;
pub mod quantity;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billnum::BillNumberGenerator;
pub use cart::{Cart, LineItem, Totals};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use quantity::Qty;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
///
/// Prevents runaway carts; generous for a counter bill.
pub const MAX_CART_LINES: usize = 100;

/// Queries at or below this length never hit the item lookup gateway.
/// Two characters match far too much of any catalog to be useful.
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

/// Maximum results requested from the item lookup gateway.
pub const SEARCH_RESULT_LIMIT: u32 = 10;

/// Typing exactly this in the item entry field saves the bill instead of
/// searching - a keyboard habit carried over from older counter software.
pub const SAVE_ALIAS_QUERY: &str = "0";
