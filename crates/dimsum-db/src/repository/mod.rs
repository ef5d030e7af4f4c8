//! # Repository Module
//!
//! Database repository implementations for Dimsum POS.
//!
//! ## Repository Pattern
//! ```text
//! Caller (settlement, dashboard)
//!      │
//!      │  db.transactions().list(&window)
//!      ▼
//! TransactionRepository
//! ├── create(&self, transaction)
//! ├── insert(&self, stored)
//! ├── list(&self, window)
//! ├── search(&self, term)
//! └── count(&self)
//!      │
//!      │  SQL
//!      ▼
//! SQLite
//! ```
//!
//! Benefits: SQL is isolated in one place, callers see domain types
//! (`StoredTransaction`, `DateWindow`) rather than rows.

pub mod transaction;
