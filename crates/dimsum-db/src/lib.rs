//! # dimsum-db: Database Layer for Dimsum POS
//!
//! This crate provides the transaction store for Dimsum POS. It uses
//! SQLite for local storage with sqlx for async operations, and owns
//! the settlement step that ties the checkout state machine to the
//! store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Dimsum POS Data Flow                        │
//! │                                                                 │
//! │  CheckoutSession (dimsum-core)                                  │
//! │       │                                                         │
//! │       │  settle_checkout(&mut session, &repo)                   │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  dimsum-db (THIS CRATE)                   │  │
//! │  │                                                           │  │
//! │  │  ┌─────────────┐  ┌──────────────────┐  ┌─────────────┐   │  │
//! │  │  │  Database   │  │  Repositories    │  │ Migrations  │   │  │
//! │  │  │  (pool.rs)  │  │ (transaction.rs) │  │ (embedded)  │   │  │
//! │  │  └─────────────┘  └──────────────────┘  └─────────────┘   │  │
//! │  └───────────────────────────┬───────────────────────────────┘  │
//! │                              ▼                                  │
//! │                       SQLite (WAL mode)                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Transaction repository
//! - [`checkout`] - Checkout settlement (persist then commit)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dimsum_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./dimsum.db")).await?;
//! let stored = dimsum_db::settle_checkout(&mut session, &db.transactions()).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use checkout::settle_checkout;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::transaction::TransactionRepository;
