//! # dimsum-core: Pure Business Logic for Dimsum POS
//!
//! This crate is the heart of Dimsum POS. It contains the order/cart
//! engine, the checkout/payment state machine, and the sales-reporting
//! aggregation as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Dimsum POS Architecture                     │
//! │                                                                 │
//! │  Cashier UI ──► Cart UI ──► Payment UI ──► Receipt / Dashboard  │
//! │                              │                                  │
//! │  ┌───────────────────────────▼───────────────────────────────┐  │
//! │  │               ★ dimsum-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │  catalog ──► cart ──► checkout ──► transaction            │  │
//! │  │                                        │                  │  │
//! │  │              report ◄── (persisted) ◄──┘                  │  │
//! │  │                │                                          │  │
//! │  │                └──► export / receipt                      │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK                        │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                              │                                  │
//! │  ┌───────────────────────────▼───────────────────────────────┐  │
//! │  │             dimsum-db (SQLite transaction store)          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer rupiah type (no floating point!)
//! - [`catalog`] - Read-only menu types supplied by the catalog collaborator
//! - [`cart`] - The in-progress order and its derived totals
//! - [`checkout`] - Checkout state machine and payment validation
//! - [`transaction`] - Immutable transaction records
//! - [`receipt`] - Fixed-width plain-text receipts
//! - [`report`] - Revenue statistics, daily series, top sellers
//! - [`export`] - CSV export of a filtered transaction list
//! - [`error`] - Domain error types

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod export;
pub mod money;
pub mod receipt;
pub mod report;
pub mod transaction;

pub use cart::{Cart, CartLine};
pub use catalog::{Category, MenuItem, MenuVariant};
pub use checkout::{CheckoutSession, CheckoutState, PaymentMethod, SessionContext};
pub use error::{CheckoutError, ReportError};
pub use money::Money;
pub use report::{DailyRevenue, DateWindow, ReportPeriod, SalesSummary, TopItem};
pub use transaction::{StoredTransaction, Transaction};

/// Number of calendar-day buckets in the revenue series.
///
/// The dashboard chart always shows the trailing week ending today,
/// zero-filled when a day had no sales.
pub const DAILY_SERIES_DAYS: usize = 7;

/// Maximum entries returned by the top-seller ranking.
pub const TOP_ITEMS_LIMIT: usize = 5;

/// The synthetic category tab prepended to the catalog's categories.
pub const ALL_CATEGORY: &str = "Semua";
