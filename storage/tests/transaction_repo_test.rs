//! Integration tests for [`storage::TransactionRepository`].
//!
//! Covers insert/read round trips, ordering of `recent`, `update`, `summary`,
//! and `clear` using an in-memory SQLite database.

use storage::{StorageError, TransactionKind, TransactionRepository};

/// **Test: Insert then read returns the same record.**
///
/// **Setup:** In-memory DB.
/// **Action:** `add(Income, 100.0, Some("salary"))`, then `get(id)`.
/// **Expected:** Returns `Some(record)` with matching kind, amount, note.
#[tokio::test]
async fn test_add_then_get() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let saved = repo
        .add(TransactionKind::Income, 100.0, Some("salary".to_string()))
        .await
        .expect("Failed to add transaction");

    let retrieved = repo.get(saved.id).await.expect("Failed to get transaction");

    assert!(retrieved.is_some());
    let record = retrieved.unwrap();
    assert_eq!(record.id, saved.id);
    assert_eq!(record.kind, "income");
    assert_eq!(record.amount, 100.0);
    assert_eq!(record.note, Some("salary".to_string()));
    assert_eq!(record.kind(), Some(TransactionKind::Income));
}

/// **Test: Non-positive and non-finite amounts are rejected.**
///
/// **Setup:** In-memory DB.
/// **Action:** `add` with 0.0, -5.0, and NaN.
/// **Expected:** Each returns `StorageError::InvalidAmount`; table stays empty.
#[tokio::test]
async fn test_add_rejects_invalid_amount() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for amount in [0.0, -5.0, f64::NAN] {
        let err = repo
            .add(TransactionKind::Expense, amount, None)
            .await
            .expect_err("Invalid amount should be rejected");
        assert!(matches!(err, StorageError::InvalidAmount(_)));
    }

    assert_eq!(repo.count().await.expect("Failed to count"), 0);
}

/// **Test: Recent returns newest first with the requested limit.**
///
/// **Setup:** Save 15 expenses.
/// **Action:** `recent(10)`.
/// **Expected:** Returns 10 records; ids strictly descending.
#[tokio::test]
async fn test_recent_limit_and_order() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for i in 0..15 {
        repo.add(
            TransactionKind::Expense,
            1.0 + i as f64,
            Some(format!("entry {}", i)),
        )
        .await
        .expect("Failed to add transaction");
    }

    let recent = repo.recent(10).await.expect("Failed to get recent");

    assert_eq!(recent.len(), 10);
    for pair in recent.windows(2) {
        assert!(pair[0].id > pair[1].id);
    }
}

/// **Test: Update rewrites amount and note of an existing row.**
///
/// **Setup:** One saved expense.
/// **Action:** `update(id, 42.5, Some("corrected"))`, then `get(id)`.
/// **Expected:** Row carries the new amount and note.
#[tokio::test]
async fn test_update_existing() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let saved = repo
        .add(TransactionKind::Expense, 10.0, Some("typo".to_string()))
        .await
        .expect("Failed to add transaction");

    repo.update(saved.id, 42.5, Some("corrected".to_string()))
        .await
        .expect("Failed to update");

    let record = repo
        .get(saved.id)
        .await
        .expect("Failed to get transaction")
        .expect("Transaction should exist");
    assert_eq!(record.amount, 42.5);
    assert_eq!(record.note, Some("corrected".to_string()));
}

/// **Test: Update of a missing id returns NotFound.**
///
/// **Setup:** Empty in-memory DB.
/// **Action:** `update(999, 1.0, None)`.
/// **Expected:** `StorageError::NotFound`.
#[tokio::test]
async fn test_update_missing_is_not_found() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let err = repo
        .update(999, 1.0, None)
        .await
        .expect_err("Update of missing row should fail");
    assert!(matches!(err, StorageError::NotFound(_)));
}

/// **Test: Summary aggregates income, expense, and count.**
///
/// **Setup:** Two incomes (100, 50) and one expense (30).
/// **Action:** `summary()`.
/// **Expected:** income 150, expense 30, balance 120, count 3, entry bounds set.
#[tokio::test]
async fn test_summary_totals() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.add(TransactionKind::Income, 100.0, None).await.unwrap();
    repo.add(TransactionKind::Income, 50.0, None).await.unwrap();
    repo.add(TransactionKind::Expense, 30.0, None).await.unwrap();

    let summary = repo.summary().await.expect("Failed to get summary");

    assert_eq!(summary.income_total, 150.0);
    assert_eq!(summary.expense_total, 30.0);
    assert_eq!(summary.balance(), 120.0);
    assert_eq!(summary.transaction_count, 3);
    assert!(summary.first_entry.is_some());
    assert!(summary.last_entry.is_some());
}

/// **Test: Summary of an empty table is all zeros.**
///
/// **Setup:** Empty in-memory DB.
/// **Action:** `summary()`.
/// **Expected:** Zero totals, zero count, no entry bounds.
#[tokio::test]
async fn test_summary_empty() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let summary = repo.summary().await.expect("Failed to get summary");

    assert_eq!(summary.income_total, 0.0);
    assert_eq!(summary.expense_total, 0.0);
    assert_eq!(summary.transaction_count, 0);
    assert!(summary.first_entry.is_none());
    assert!(summary.last_entry.is_none());
}

/// **Test: A file-backed database persists across reopen.**
///
/// **Setup:** Temp dir; repository on a fresh file path (created on demand).
/// **Action:** Save one entry, drop the repository, reopen the same path.
/// **Expected:** The entry is still there with the same id and amount.
#[tokio::test]
async fn test_file_backed_persistence() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("ledger.db");
    let url = db_path.to_str().expect("utf-8 path").to_string();

    let id = {
        let repo = TransactionRepository::new(&url)
            .await
            .expect("Failed to create repository");
        let saved = repo
            .add(TransactionKind::Income, 77.0, Some("persisted".to_string()))
            .await
            .expect("Failed to add transaction");
        saved.id
    };

    let reopened = TransactionRepository::new(&url)
        .await
        .expect("Failed to reopen repository");
    let record = reopened
        .get(id)
        .await
        .expect("Failed to get transaction")
        .expect("Transaction should survive reopen");
    assert_eq!(record.amount, 77.0);
    assert_eq!(record.note, Some("persisted".to_string()));
}

/// **Test: Clear removes every row and reports the count.**
///
/// **Setup:** Three saved entries.
/// **Action:** `clear()`, then `recent(10)`.
/// **Expected:** Clear returns 3; recent returns empty vec.
#[tokio::test]
async fn test_clear() {
    let repo = TransactionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for _ in 0..3 {
        repo.add(TransactionKind::Income, 5.0, None).await.unwrap();
    }

    let removed = repo.clear().await.expect("Failed to clear");
    assert_eq!(removed, 3);

    let recent = repo.recent(10).await.expect("Failed to get recent");
    assert!(recent.is_empty());
}
