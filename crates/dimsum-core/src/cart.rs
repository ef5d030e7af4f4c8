//! # Cart Engine
//!
//! The in-progress order: line items keyed by variant id, with derived
//! totals recomputed on every read.
//!
//! ## Invariants
//! - At most one [`CartLine`] per `line_id` (adding the same variant
//!   again increments its quantity)
//! - Every surviving line has `quantity >= 1`; a line reaching zero is
//!   removed, never kept at zero
//! - The cart is transient UI state - it is never persisted directly,
//!   only snapshotted into a transaction at checkout

use serde::{Deserialize, Serialize};

use crate::catalog::{MenuItem, MenuVariant};
use crate::money::Money;

// =============================================================================
// Cart Line
// =============================================================================

/// One row in the cart: a specific menu variant and its quantity.
///
/// ## Price Freezing
/// The name, variant label, and unit price are copied from the catalog
/// when the line is created, so the cart (and the transaction snapshot
/// built from it) stays consistent even if the menu is edited later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line id, equal to the variant id it was created from.
    pub line_id: String,
    /// The parent menu item.
    pub menu_item_id: String,
    /// Item name at time of adding (frozen).
    pub name: String,
    /// Variant size label at time of adding (frozen).
    pub variant: String,
    /// Unit price at time of adding (frozen).
    pub unit_price: Money,
    /// Quantity in the cart. Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// Created empty at order start, mutated by the cashier screen, cleared
/// on successful checkout or explicit reset. Lines keep their insertion
/// order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds one unit of a variant to the cart.
    ///
    /// If a line for this variant already exists its quantity goes up
    /// by one; otherwise a new line with quantity 1 is appended. Never
    /// fails - callers must pass catalog-valid `(item, variant)` pairs.
    pub fn add_item(&mut self, item: &MenuItem, variant: &MenuVariant) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == variant.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine {
            line_id: variant.id.clone(),
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            variant: variant.size.clone(),
            unit_price: variant.price,
            quantity: 1,
        });
    }

    /// Adds `delta` to a line's quantity, clamped at a floor of zero.
    ///
    /// A line reaching zero is removed. An unknown `line_id` is a
    /// no-op.
    pub fn change_quantity(&mut self, line_id: &str, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_id == line_id) {
            let new_qty = (line.quantity as i64 + delta).max(0);
            if new_qty == 0 {
                self.lines.retain(|l| l.line_id != line_id);
            } else {
                line.quantity = new_qty as u32;
            }
        }
    }

    /// Removes a line unconditionally. No-op if absent.
    pub fn remove_line(&mut self, line_id: &str) {
        self.lines.retain(|l| l.line_id != line_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines (the cart badge number).
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals. Recomputed on every read - there is no
    /// cached total to go stale.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Tax policy. Currently a fixed zero, kept as a named seam so a
    /// future rate can be applied without changing callers.
    pub fn tax(&self) -> Money {
        Money::zero()
    }

    /// Grand total: subtotal plus tax.
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
