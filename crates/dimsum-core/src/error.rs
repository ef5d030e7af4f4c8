//! # Error Types
//!
//! Domain-specific error types for dimsum-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include context in error messages (amounts, totals)
//! 3. Errors are enum variants, never bare strings
//! 4. Every checkout error is recoverable: the session stays in its
//!    current state so the cashier can correct the input and retry

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors raised by the checkout/payment state machine.
///
/// None of these are fatal. The UI-facing caller catches them, shows a
/// message, and leaves the session where it was (Building or
/// AwaitingPayment).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Payment completion attempted before a method was chosen.
    #[error("no payment method selected")]
    PaymentMethodNotSelected,

    /// Cash tendered is below the order total.
    #[error("insufficient cash: tendered {tendered}, total {total}")]
    InsufficientFunds { tendered: Money, total: Money },

    /// The operation is not valid in the session's current state,
    /// e.g. selecting a payment method while still Building.
    #[error("invalid checkout state: {0}")]
    InvalidState(&'static str),

    /// The persistence collaborator failed to record the transaction.
    /// The session remains in AwaitingPayment so the operator can retry.
    #[error("failed to store transaction: {0}")]
    Persistence(String),
}

// =============================================================================
// Report Error
// =============================================================================

/// Errors raised while building a report filter.
///
/// Note that the aggregation itself never fails - it degrades to
/// zeroed/empty output. Only the filter construction can reject input.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A custom date range needs both a start and an end date.
    #[error("custom range requires both start and end dates")]
    IncompleteCustomRange,
}

/// Convenience alias for checkout results.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckoutError::InsufficientFunds {
            tendered: Money::from_rupiah(50_000),
            total: Money::from_rupiah(61_000),
        };
        assert_eq!(
            err.to_string(),
            "insufficient cash: tendered Rp 50.000, total Rp 61.000"
        );

        assert_eq!(CheckoutError::EmptyCart.to_string(), "cart is empty");
    }
}
