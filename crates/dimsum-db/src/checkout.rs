//! # Checkout Settlement
//!
//! Ties the checkout state machine to the transaction store: the
//! session only transitions to Completed once the row is confirmed
//! written.
//!
//! ## Failure Ordering
//! ```text
//! prepare_transaction()  ── validation fails ──► session unchanged
//!        │
//!        ▼
//! repo.create()          ── insert fails ──► CheckoutError::Persistence,
//!        │                                   session stays AwaitingPayment
//!        ▼                                   (operator can retry)
//! mark_completed()       ── cart cleared, state = Completed
//! ```

use tracing::{debug, info};

use crate::repository::transaction::TransactionRepository;
use dimsum_core::{CheckoutError, CheckoutSession, StoredTransaction};

/// Completes a payment against the store.
///
/// Validates the session, persists the transaction, and only then
/// commits the Completed transition. On a persistence failure the
/// session stays in AwaitingPayment with its cart and payment selection
/// intact, and the error carries the store's message.
pub async fn settle_checkout(
    session: &mut CheckoutSession,
    repo: &TransactionRepository,
) -> Result<StoredTransaction, CheckoutError> {
    let pending = session.prepare_transaction()?;
    debug!(order_number = %pending.order_number, "Settling checkout");

    let stored = repo
        .create(&pending)
        .await
        .map_err(|e| CheckoutError::Persistence(e.to_string()))?;

    session.mark_completed();

    info!(
        order_number = %stored.order_number,
        total = %stored.total,
        payment_method = stored.payment_method.as_str(),
        "Transaction settled"
    );
    Ok(stored)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use dimsum_core::report::DateWindow;
    use dimsum_core::{
        CheckoutState, MenuItem, MenuVariant, Money, PaymentMethod, SessionContext,
    };

    fn session_awaiting_payment() -> CheckoutSession {
        let mut session = CheckoutSession::new(SessionContext {
            branch_id: "b1".to_string(),
            branch_name: "Outlet 1".to_string(),
            cashier: "kasir-01".to_string(),
        });

        let variant = MenuVariant {
            id: "v1".to_string(),
            menu_item_id: "m1".to_string(),
            size: "Besar".to_string(),
            price: Money::from_rupiah(18_000),
        };
        let item = MenuItem {
            id: "m1".to_string(),
            name: "Dimsum Ayam".to_string(),
            category: "Dimsum Kukus".to_string(),
            emoji: None,
            variants: vec![variant.clone()],
        };
        let cart = session.cart_mut().unwrap();
        cart.add_item(&item, &variant);
        cart.add_item(&item, &variant);

        session.begin_checkout().unwrap();
        session
    }

    #[tokio::test]
    async fn test_settle_persists_and_completes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.transactions();

        let mut session = session_awaiting_payment();
        session.select_payment_method(PaymentMethod::Cash).unwrap();
        session.submit_cash_amount(Money::from_rupiah(50_000)).unwrap();

        let stored = settle_checkout(&mut session, &repo).await.unwrap();
        assert_eq!(stored.total, Money::from_rupiah(36_000));
        assert_eq!(stored.change_amount, Money::from_rupiah(14_000));

        assert_eq!(session.state(), CheckoutState::Completed);
        assert!(session.cart().is_empty());

        let listed = repo.list(&DateWindow::unbounded()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, stored.id);
        assert_eq!(listed[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_settle_validation_error_leaves_session() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.transactions();

        // No payment method selected.
        let mut session = session_awaiting_payment();
        let err = settle_checkout(&mut session, &repo).await.unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentMethodNotSelected));

        assert_eq!(session.state(), CheckoutState::AwaitingPayment);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_settle_store_failure_keeps_session_retryable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.transactions();
        db.close().await;

        let mut session = session_awaiting_payment();
        session.select_payment_method(PaymentMethod::Qris).unwrap();

        let err = settle_checkout(&mut session, &repo).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Persistence(_)));

        // Cart and selection survive for a retry.
        assert_eq!(session.state(), CheckoutState::AwaitingPayment);
        assert_eq!(session.payment_method(), Some(PaymentMethod::Qris));
        assert_eq!(session.cart().total(), Money::from_rupiah(36_000));
    }
}
