//! Aggregate totals over the transactions table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Totals for the report view: income, expense, and the running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub income_total: f64,
    pub expense_total: f64,
    pub transaction_count: i64,
    pub first_entry: Option<DateTime<Utc>>,
    pub last_entry: Option<DateTime<Utc>>,
}

impl LedgerSummary {
    /// Income minus expense.
    pub fn balance(&self) -> f64 {
        self.income_total - self.expense_total
    }
}
