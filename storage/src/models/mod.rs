//! Record models for ledger persistence.

mod debtor;
mod summary;
mod transaction;

pub use debtor::DebtorRecord;
pub use summary::LedgerSummary;
pub use transaction::{TransactionKind, TransactionRecord};
