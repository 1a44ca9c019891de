//! Debtor repository: registration, payment, and retention purge.
//!
//! Uses SqlitePoolManager and DebtorRecord. Paid debtors stay listed until
//! the sweeper calls purge_paid_before with the retention cutoff.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::StorageError;
use crate::models::DebtorRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct DebtorRepository {
    pool_manager: SqlitePoolManager,
}

impl DebtorRepository {
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
        info!("Creating debtors table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS debtors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                paid INTEGER NOT NULL DEFAULT 0,
                paid_at TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_debtors_paid_at ON debtors(paid, paid_at)",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Registers a debtor. Amounts must be strictly positive.
    pub async fn add(&self, name: &str, amount: f64) -> Result<DebtorRecord, StorageError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StorageError::InvalidAmount(amount));
        }

        let pool = self.pool_manager.pool();
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO debtors (name, amount, paid, paid_at, created_at) VALUES (?, ?, 0, NULL, ?)",
        )
        .bind(name)
        .bind(amount)
        .bind(created_at)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(id, name, amount, "Registered debtor");

        Ok(DebtorRecord {
            id,
            name: name.to_string(),
            amount,
            paid: false,
            paid_at: None,
            created_at,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<DebtorRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let record = sqlx::query_as::<_, DebtorRecord>("SELECT * FROM debtors WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// All debtors, unpaid first, then by registration time.
    pub async fn list(&self) -> Result<Vec<DebtorRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let records: Vec<DebtorRecord> = sqlx::query_as::<_, DebtorRecord>(
            "SELECT * FROM debtors ORDER BY paid ASC, created_at ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} debtors", records.len());
        Ok(records)
    }

    /// Rewrites name and amount of an existing debtor.
    pub async fn update(&self, id: i64, name: &str, amount: f64) -> Result<(), StorageError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StorageError::InvalidAmount(amount));
        }

        let pool = self.pool_manager.pool();

        let result = sqlx::query("UPDATE debtors SET name = ?, amount = ? WHERE id = ?")
            .bind(name)
            .bind(amount)
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("debtor {}", id)));
        }

        info!(id, name, amount, "Updated debtor");
        Ok(())
    }

    /// Flags a debtor as paid and stamps paid_at. Idempotent: an already
    /// paid debtor keeps its original paid_at.
    pub async fn mark_paid(&self, id: i64) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM debtors WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        if exists.is_none() {
            return Err(StorageError::NotFound(format!("debtor {}", id)));
        }

        sqlx::query("UPDATE debtors SET paid = 1, paid_at = ? WHERE id = ? AND paid = 0")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        info!(id, "Marked debtor paid");
        Ok(())
    }

    /// Deletes paid debtors whose paid_at is before the cutoff.
    /// Unpaid rows are never touched.
    pub async fn purge_paid_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM debtors WHERE paid = 1 AND paid_at < ?")
            .bind(cutoff)
            .execute(pool)
            .await?;

        info!(
            removed = result.rows_affected(),
            %cutoff,
            "Purged paid debtors past retention"
        );
        Ok(result.rows_affected())
    }

    /// Deletes every debtor; returns how many were removed.
    pub async fn clear(&self) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM debtors").execute(pool).await?;

        info!("Cleared {} debtors", result.rows_affected());
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM debtors")
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }
}
