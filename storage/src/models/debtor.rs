//! Debtor record model for persistence.
//!
//! Maps to the `debtors` table and is used by DebtorRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person owing money. Tracked until marked paid and purged after the
/// retention window.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DebtorRecord {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
