//! Storage crate: ledger persistence and repository abstractions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TransactionRecord, DebtorRecord, LedgerSummary
//! - [`transaction_repo`] – TransactionRepository (SQLite)
//! - [`debtor_repo`] – DebtorRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod debtor_repo;
mod error;
mod models;
mod sqlite_pool;
mod transaction_repo;

pub use debtor_repo::DebtorRepository;
pub use error::StorageError;
pub use models::{DebtorRecord, LedgerSummary, TransactionKind, TransactionRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use transaction_repo::TransactionRepository;
