//! Retention sweeper: timer-driven purge of paid debtors.
//!
//! Paid debtors stay visible for `retention_days` after payment, then the
//! sweeper deletes them. Runs on a tokio interval; a failed sweep is logged
//! and retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, error, info};

use storage::{DebtorRepository, StorageError};

/// One sweep: deletes paid debtors whose payment is older than the window.
pub async fn purge_once(
    debtors: &DebtorRepository,
    retention_days: i64,
) -> Result<u64, StorageError> {
    let cutoff = Utc::now() - chrono::Duration::days(retention_days);
    debtors.purge_paid_before(cutoff).await
}

/// Sweeps forever at the given interval. The first sweep runs immediately.
pub async fn run_sweeper(
    debtors: Arc<DebtorRepository>,
    retention_days: i64,
    interval_secs: u64,
) {
    info!(
        retention_days,
        interval_secs, "Starting debtor retention sweeper"
    );

    let mut ticker = interval(Duration::from_secs(interval_secs));
    loop {
        ticker.tick().await;
        match purge_once(&debtors, retention_days).await {
            Ok(0) => debug!("Sweep found no expired paid debtors"),
            Ok(removed) => info!(removed, "Sweep removed expired paid debtors"),
            Err(e) => error!(error = %e, "Sweep failed, will retry on next tick"),
        }
    }
}
