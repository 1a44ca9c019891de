//! Transaction repository: persistence and queries for ledger entries.
//!
//! Uses SqlitePoolManager and the models (TransactionRecord, LedgerSummary).
//! External: SQLite via sqlx; callers use add/recent/update/summary/clear.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::StorageError;
use crate::models::{LedgerSummary, TransactionKind, TransactionRecord};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct TransactionRepository {
    pool_manager: SqlitePoolManager,
}

impl TransactionRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    /// Builds the repository on an existing pool so transactions and
    /// debtors share one database file.
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating transactions table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                note TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_created_at ON transactions(created_at);
            CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Inserts a new entry and returns it with the assigned id.
    /// Amounts must be strictly positive.
    pub async fn add(
        &self,
        kind: TransactionKind,
        amount: f64,
        note: Option<String>,
    ) -> Result<TransactionRecord, StorageError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StorageError::InvalidAmount(amount));
        }

        let pool = self.pool_manager.pool();
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO transactions (kind, amount, note, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(kind.as_str())
        .bind(amount)
        .bind(&note)
        .bind(created_at)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id, kind = kind.as_str(), amount, "Saved transaction");

        Ok(TransactionRecord {
            id,
            kind: kind.as_str().to_string(),
            amount,
            note,
            created_at,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<TransactionRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record =
            sqlx::query_as::<_, TransactionRecord>("SELECT * FROM transactions WHERE id = ?")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(record)
    }

    /// Latest entries, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<TransactionRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let records: Vec<TransactionRecord> = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} transactions", records.len());
        Ok(records)
    }

    /// Rewrites amount and note of an existing entry.
    pub async fn update(
        &self,
        id: i64,
        amount: f64,
        note: Option<String>,
    ) -> Result<(), StorageError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StorageError::InvalidAmount(amount));
        }

        let pool = self.pool_manager.pool();

        let result = sqlx::query("UPDATE transactions SET amount = ?, note = ? WHERE id = ?")
            .bind(amount)
            .bind(&note)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("transaction {}", id)));
        }

        info!(id, amount, "Updated transaction");
        Ok(())
    }

    pub async fn summary(&self) -> Result<LedgerSummary, StorageError> {
        let pool = self.pool_manager.pool();

        let income_total: (Option<f64>,) =
            sqlx::query_as("SELECT SUM(amount) FROM transactions WHERE kind = 'income'")
                .fetch_one(pool)
                .await?;

        let expense_total: (Option<f64>,) =
            sqlx::query_as("SELECT SUM(amount) FROM transactions WHERE kind = 'expense'")
                .fetch_one(pool)
                .await?;

        let transaction_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await?;

        let first_entry: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MIN(created_at) FROM transactions")
                .fetch_one(pool)
                .await?;

        let last_entry: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(created_at) FROM transactions")
                .fetch_one(pool)
                .await?;

        Ok(LedgerSummary {
            income_total: income_total.0.unwrap_or(0.0),
            expense_total: expense_total.0.unwrap_or(0.0),
            transaction_count: transaction_count.0,
            first_entry: first_entry.0,
            last_entry: last_entry.0,
        })
    }

    /// Deletes every entry; returns how many were removed.
    pub async fn clear(&self) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM transactions").execute(pool).await?;

        info!("Cleared {} transactions", result.rows_affected());
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }
}
