//! Transaction record model for persistence.
//!
//! Maps to the `transactions` table and is used by TransactionRepository.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a ledger entry. Stored as TEXT (`income` / `expense`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind: {}", other)),
        }
    }
}

/// One income or expense entry. `id` is assigned by SQLite (AUTOINCREMENT).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    pub kind: String,
    pub amount: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Parsed kind of this record. Rows are only ever written through
    /// [`TransactionKind::as_str`], so the stored text always parses.
    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind.parse().ok()
    }
}
