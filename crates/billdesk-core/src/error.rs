//! # Error Types
//!
//! Domain-specific error types for billdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billdesk-core errors (this file)                                      │
//! │  └── CoreError     - Cart mutation failures                            │
//! │                                                                         │
//! │  billdesk-engine errors (separate crate)                               │
//! │  ├── GatewayError  - Lookup/submission transport failures              │
//! │  └── EngineError   - What the dispatcher surfaces to the caller        │
//! │                                                                         │
//! │  Flow: CoreError → EngineError → UI shell                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (catalog id, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart-level business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An operation referenced a catalog id with no line in the cart.
    ///
    /// The old billing screen silently ignored this case; the cart now
    /// reports it and lets the dispatcher decide what to surface.
    #[error("No cart line for catalog item: {0}")]
    LineNotFound(String),

    /// A numeric input was outside its allowed range (negative rate,
    /// negative discount).
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    /// Save/Print requested on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has reached the maximum number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineNotFound("ITM-042".to_string());
        assert_eq!(err.to_string(), "No cart line for catalog item: ITM-042");

        let err = CoreError::InvalidValue {
            field: "rate",
            value: "-₹5.00".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid rate: -₹5.00");

        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }
}
