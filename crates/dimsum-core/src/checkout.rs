//! # Checkout State Machine
//!
//! Validates a payment against the cart total and produces the
//! immutable transaction record.
//!
//! ## States
//! ```text
//! ┌──────────┐ begin_checkout ┌─────────────────┐ complete_payment ┌───────────┐
//! │ Building │───────────────►│ AwaitingPayment │─────────────────►│ Completed │
//! │ (cart    │                │ (cart frozen,   │                  │ (record   │
//! │ mutable) │◄───────────────│ choosing method)│                  │  emitted) │
//! └──────────┘     cancel     └─────────────────┘                  └───────────┘
//! ```
//!
//! The state machine is invoked by, but independent of, any UI layer -
//! it is unit-testable without a rendering environment. Each checkout
//! session owns its cart exclusively; there is no shared mutable state
//! between sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::transaction::Transaction;

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// Only cash involves a tendered amount and change; the electronic
/// methods settle at exactly the order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash (Tunai).
    Cash,
    /// QRIS standardized QR payment.
    Qris,
    /// Debit card on an external terminal.
    Debit,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// Lowercase wire id, as persisted and exported.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Qris => "qris",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Transfer => "transfer",
        }
    }

    /// Display label shown on the payment screen and receipts.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Debit => "Debit Card",
            PaymentMethod::Transfer => "Transfer",
        }
    }

    /// Parses a wire id back into a method.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "qris" => Some(PaymentMethod::Qris),
            "debit" => Some(PaymentMethod::Debit),
            "transfer" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }
}

// =============================================================================
// Session Context
// =============================================================================

/// Who and where: the ambient session data a checkout needs.
///
/// Passed into the session constructor rather than read from global
/// state, so concurrent sessions on different branches cannot couple
/// through hidden module-level variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub branch_id: String,
    /// Branch display name, e.g. "Outlet 1".
    pub branch_name: String,
    /// Cashier identifier for audit purposes.
    pub cashier: String,
}

// =============================================================================
// Checkout State
// =============================================================================

/// Lifecycle of a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// Cart is mutable, order still being built.
    Building,
    /// Cart frozen, payment method being chosen.
    AwaitingPayment,
    /// Transaction emitted.
    Completed,
}

// =============================================================================
// Checkout Session
// =============================================================================

/// A single checkout session: one cart, one state machine, one
/// eventual transaction.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    ctx: SessionContext,
    cart: Cart,
    state: CheckoutState,
    method: Option<PaymentMethod>,
    tendered: Option<Money>,
}

impl CheckoutSession {
    /// Creates a new session in Building state with an empty cart.
    pub fn new(ctx: SessionContext) -> Self {
        CheckoutSession {
            ctx,
            cart: Cart::new(),
            state: CheckoutState::Building,
            method: None,
            tendered: None,
        }
    }

    /// The session context this checkout was opened with.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Read access to the cart in any state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access to the cart, only while Building. Once checkout
    /// has begun the cart is frozen and this returns `None`.
    pub fn cart_mut(&mut self) -> Option<&mut Cart> {
        match self.state {
            CheckoutState::Building => Some(&mut self.cart),
            _ => None,
        }
    }

    /// The payment method selected so far, if any.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.method
    }

    /// Freezes the cart and moves to AwaitingPayment.
    ///
    /// Fails with [`CheckoutError::EmptyCart`] if the cart has no
    /// lines. Any previous payment selection is discarded.
    pub fn begin_checkout(&mut self) -> CheckoutResult<()> {
        if self.state != CheckoutState::Building {
            return Err(CheckoutError::InvalidState("checkout already begun"));
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::AwaitingPayment;
        self.method = None;
        self.tendered = None;
        Ok(())
    }

    /// Records the chosen payment method.
    ///
    /// For cash, a tendered amount must still be submitted before the
    /// payment can complete; for the other methods the tendered amount
    /// defaults to the order total.
    pub fn select_payment_method(&mut self, method: PaymentMethod) -> CheckoutResult<()> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(CheckoutError::InvalidState("not awaiting payment"));
        }

        self.method = Some(method);
        // Switching methods invalidates any previously entered cash.
        self.tendered = None;
        Ok(())
    }

    /// Records the cash handed over and returns the change due.
    ///
    /// Fails with [`CheckoutError::InsufficientFunds`] when the amount
    /// is below the order total; the session stays in AwaitingPayment
    /// so the operator can correct it.
    pub fn submit_cash_amount(&mut self, amount: Money) -> CheckoutResult<Money> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(CheckoutError::InvalidState("not awaiting payment"));
        }
        if self.method != Some(PaymentMethod::Cash) {
            return Err(CheckoutError::InvalidState("cash amount without cash method"));
        }

        let total = self.cart.total();
        if amount < total {
            return Err(CheckoutError::InsufficientFunds {
                tendered: amount,
                total,
            });
        }

        self.tendered = Some(amount);
        Ok(amount - total)
    }

    /// Validates the payment selection and builds the transaction
    /// record without leaving AwaitingPayment.
    ///
    /// This is the first half of completion: callers that persist the
    /// record asynchronously insert it first and call
    /// [`mark_completed`](Self::mark_completed) only once the store
    /// confirmed the write, so a persistence failure leaves the session
    /// ready for retry.
    pub fn prepare_transaction(&self) -> CheckoutResult<Transaction> {
        self.build_transaction(Utc::now())
    }

    /// Commits the transition to Completed and clears the cart.
    pub fn mark_completed(&mut self) {
        self.state = CheckoutState::Completed;
        self.cart.clear();
    }

    /// Validates, builds the transaction, and transitions to Completed
    /// in one step. For callers without an asynchronous persistence
    /// boundary in between.
    pub fn complete_payment(&mut self) -> CheckoutResult<Transaction> {
        let transaction = self.prepare_transaction()?;
        self.mark_completed();
        Ok(transaction)
    }

    /// Returns to Building, discarding the payment selection. The cart
    /// contents are untouched. No-op outside AwaitingPayment.
    pub fn cancel(&mut self) {
        if self.state == CheckoutState::AwaitingPayment {
            self.state = CheckoutState::Building;
            self.method = None;
            self.tendered = None;
        }
    }

    /// Resets a completed session for the next customer.
    pub fn start_new_order(&mut self) {
        self.cart.clear();
        self.state = CheckoutState::Building;
        self.method = None;
        self.tendered = None;
    }

    fn build_transaction(&self, now: DateTime<Utc>) -> CheckoutResult<Transaction> {
        if self.state != CheckoutState::AwaitingPayment {
            return Err(CheckoutError::InvalidState("not awaiting payment"));
        }

        let method = self.method.ok_or(CheckoutError::PaymentMethodNotSelected)?;
        let subtotal = self.cart.subtotal();
        let tax = self.cart.tax();
        let total = self.cart.total();

        let (cash_amount, change_amount) = match method {
            PaymentMethod::Cash => {
                let tendered = self.tendered.ok_or(CheckoutError::InsufficientFunds {
                    tendered: Money::zero(),
                    total,
                })?;
                if tendered < total {
                    return Err(CheckoutError::InsufficientFunds { tendered, total });
                }
                (tendered, tendered - total)
            }
            // Electronic methods settle at exactly the total.
            _ => (total, Money::zero()),
        };

        Ok(Transaction {
            order_number: generate_order_number(now),
            branch: self.ctx.branch_name.clone(),
            branch_id: self.ctx.branch_id.clone(),
            items: self.cart.lines().to_vec(),
            subtotal,
            tax,
            total,
            payment_method: method,
            cash_amount,
            change_amount,
            created_at: now,
        })
    }
}

// =============================================================================
// Order Numbers
// =============================================================================

/// Generates a display order number: `ORD-<YYYYMMDD>-<4 digits>`.
///
/// The suffix is derived from the clock's sub-second nanos, giving
/// 10 000 possible values per day. This is a display identifier, not a
/// uniqueness guarantee - the persisted row id is the real primary key.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix = now.timestamp_subsec_nanos() % 10_000;
    format!("ORD-{}-{:04}", now.format("%Y%m%d"), suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================
