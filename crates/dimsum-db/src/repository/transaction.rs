//! # Transaction Repository
//!
//! Database operations for completed checkout transactions.
//!
//! ## Storage Model
//! ```text
//! Transaction (dimsum-core)          transactions table
//! ┌──────────────────────┐           ┌─────────────────────────────┐
//! │ order_number         │           │ id (UUID, assigned here)    │
//! │ items: Vec<CartLine> │──────────►│ items: JSON TEXT            │
//! │ subtotal/tax/total   │  create() │ subtotal/tax/total: INTEGER │
//! │ payment_method       │           │ payment_method: TEXT        │
//! │ ...                  │           │ created_at: TEXT (UTC)      │
//! └──────────────────────┘           └─────────────────────────────┘
//! ```
//!
//! Timestamps are stored in a fixed-width UTC text format so that the
//! `created_at` index sorts and range-filters lexicographically.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dimsum_core::report::DateWindow;
use dimsum_core::transaction::parse_line_items;
use dimsum_core::{Money, PaymentMethod, StoredTransaction, Transaction};

/// Fixed-width UTC timestamp format. Lexicographic order equals
/// chronological order, which the range queries below rely on.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

const COLUMNS: &str = "id, order_number, branch, branch_id, items, \
                       subtotal, tax, total, payment_method, \
                       cash_amount, change_amount, created_at";

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Persists a freshly completed transaction.
    ///
    /// Assigns the row id (UUID v4) and the authoritative `created_at`
    /// here, and returns the stored form with both filled in.
    pub async fn create(&self, transaction: &Transaction) -> DbResult<StoredTransaction> {
        let stored = StoredTransaction {
            id: Uuid::new_v4().to_string(),
            order_number: transaction.order_number.clone(),
            branch: transaction.branch.clone(),
            branch_id: transaction.branch_id.clone(),
            items: transaction.items.clone(),
            subtotal: transaction.subtotal,
            tax: transaction.tax,
            total: transaction.total,
            payment_method: transaction.payment_method,
            cash_amount: transaction.cash_amount,
            change_amount: transaction.change_amount,
            created_at: Utc::now(),
        };

        self.insert(&stored).await?;
        Ok(stored)
    }

    /// Inserts a stored transaction verbatim, keeping its id and
    /// timestamp. Used by the seed binary and data imports; normal
    /// settlement goes through [`create`](Self::create).
    pub async fn insert(&self, stored: &StoredTransaction) -> DbResult<()> {
        debug!(id = %stored.id, order_number = %stored.order_number, "Inserting transaction");

        let items_json = serde_json::to_string(&stored.items)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, order_number, branch, branch_id, items,
                subtotal, tax, total, payment_method,
                cash_amount, change_amount, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.order_number)
        .bind(&stored.branch)
        .bind(&stored.branch_id)
        .bind(&items_json)
        .bind(stored.subtotal.rupiah())
        .bind(stored.tax.rupiah())
        .bind(stored.total.rupiah())
        .bind(stored.payment_method.as_str())
        .bind(stored.cash_amount.rupiah())
        .bind(stored.change_amount.rupiah())
        .bind(encode_timestamp(stored.created_at))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a transaction by row id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StoredTransaction>> {
        let row: Option<TransactionRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM transactions WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TransactionRow::into_stored).transpose()
    }

    /// Lists transactions inside a half-open `[start, end)` window,
    /// newest first. Unbounded sides of the window are skipped in SQL.
    pub async fn list(&self, window: &DateWindow) -> DbResult<Vec<StoredTransaction>> {
        let mut sql = format!("SELECT {COLUMNS} FROM transactions");
        let mut clauses = Vec::new();
        if window.start.is_some() {
            clauses.push("created_at >= ?");
        }
        if window.end.is_some() {
            clauses.push("created_at < ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, TransactionRow>(&sql);
        if let Some(start) = window.start {
            query = query.bind(encode_timestamp(start));
        }
        if let Some(end) = window.end {
            query = query.bind(encode_timestamp(end));
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(TransactionRow::into_stored).collect()
    }

    /// Case-insensitive order-number substring search, newest first.
    pub async fn search(&self, term: &str) -> DbResult<Vec<StoredTransaction>> {
        let pattern = format!("%{}%", term);

        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE order_number LIKE ?1 \
             ORDER BY created_at DESC"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_stored).collect()
    }

    /// Total number of stored transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row shape as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: String,
    order_number: String,
    branch: String,
    branch_id: String,
    items: String,
    subtotal: i64,
    tax: i64,
    total: i64,
    payment_method: String,
    cash_amount: i64,
    change_amount: i64,
    created_at: String,
}

impl TransactionRow {
    /// Converts a raw row into the domain form.
    ///
    /// An undecodable `items` column degrades to an empty list (the
    /// reporting aggregator tolerates it), but an unknown payment
    /// method or timestamp is a corrupt row and surfaces as an error.
    fn into_stored(self) -> DbResult<StoredTransaction> {
        let payment_method = PaymentMethod::parse(&self.payment_method).ok_or_else(|| {
            DbError::CorruptRow(format!("unknown payment method '{}'", self.payment_method))
        })?;
        let created_at = decode_timestamp(&self.created_at)?;

        Ok(StoredTransaction {
            id: self.id,
            order_number: self.order_number,
            branch: self.branch,
            branch_id: self.branch_id,
            items: parse_line_items(&self.items),
            subtotal: Money::from_rupiah(self.subtotal),
            tax: Money::from_rupiah(self.tax),
            total: Money::from_rupiah(self.total),
            payment_method,
            cash_amount: Money::from_rupiah(self.cash_amount),
            change_amount: Money::from_rupiah(self.change_amount),
            created_at,
        })
    }
}

fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn decode_timestamp(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::CorruptRow(format!("bad timestamp '{raw}': {e}")))
}

// =============================================================================
// Unit Tests
// =============================================================================
