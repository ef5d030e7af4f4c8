//! # Transaction Records
//!
//! Immutable records produced at checkout completion and handed to the
//! persistence collaborator. The core never mutates a transaction after
//! it is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cart::CartLine;
use crate::checkout::PaymentMethod;
use crate::money::Money;

// =============================================================================
// Transaction
// =============================================================================

/// A finalized order, built by the checkout state machine.
///
/// ## Invariants
/// - `total = subtotal + tax`
/// - cash: `change_amount = cash_amount - total >= 0`
/// - non-cash: `cash_amount = total` and `change_amount` is zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Display identifier: `ORD-<YYYYMMDD>-<4 digits>`.
    pub order_number: String,
    /// Branch display name, e.g. "Outlet 1".
    pub branch: String,
    /// Branch id the transaction belongs to.
    pub branch_id: String,
    /// Snapshot of the cart at checkout time.
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Amount tendered. Equals `total` for non-cash methods.
    pub cash_amount: Money,
    /// Change returned. Zero for non-cash methods.
    pub change_amount: Money,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Stored Transaction
// =============================================================================

/// A transaction as returned by the persistence collaborator: the same
/// fields plus a server-assigned id and server-assigned `created_at`.
///
/// Deserialization is deliberately tolerant of partial data: an absent
/// or non-array `items` value becomes an empty list, so the reporting
/// aggregator never fails on a malformed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: String,
    pub order_number: String,
    pub branch: String,
    pub branch_id: String,
    #[serde(default, deserialize_with = "items_or_empty")]
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub cash_amount: Money,
    pub change_amount: Money,
    pub created_at: DateTime<Utc>,
}

/// Decodes a line-item array, treating anything that is not an array
/// (null, a string, an object) as empty rather than failing the whole
/// row.
fn items_or_empty<'de, D>(deserializer: D) -> Result<Vec<CartLine>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => {
            Ok(serde_json::from_value(value).unwrap_or_default())
        }
        _ => Ok(Vec::new()),
    }
}

/// Parses a raw JSON line-item column with the same leniency as
/// [`StoredTransaction`] deserialization. Used by storage backends that
/// keep the snapshot as a JSON text column.
pub fn parse_line_items(raw: &str) -> Vec<CartLine> {
    serde_json::from_str(raw).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
