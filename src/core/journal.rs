//! Journal trait - the transaction persistence seam
//!
//! The transfer engine writes ledger records through this trait so that the
//! storage backing can vary (in-memory log, a real datastore adapter, or a
//! deliberately failing journal in rollback tests) without touching the
//! engine's atomic-commit logic.
//!
//! # Contract
//!
//! - `append` is called inside the engine's atomic scope, while both account
//!   locks are held. A returned error means nothing was persisted; the engine
//!   will roll back its balance mutations and surface a persistence error.
//! - Records are immutable once appended. There is no update or delete.
//! - `sent_total_on` must reflect every previously appended record where the
//!   account was the sender, bucketed by calendar day of `created_at`.

use crate::types::{AccountNumber, BankError, TransactionRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Append-only transaction persistence
pub trait Journal: Send + Sync {
    /// Persist a record, assigning its ledger id
    ///
    /// Returns the stored record (with its assigned id) on success. On
    /// failure nothing is persisted and the caller must roll back any
    /// balance mutations made in the same atomic scope.
    fn append(&self, record: TransactionRecord) -> Result<TransactionRecord, BankError>;

    /// Total amount sent from `account` on the given calendar day
    ///
    /// Only records where `account` was the sender count toward the total;
    /// incoming credits never consume limit budget.
    fn sent_total_on(&self, account: &AccountNumber, day: NaiveDate) -> Decimal;

    /// Every record in which `account` participated, in append order
    fn statement(&self, account: &AccountNumber) -> Vec<TransactionRecord>;

    /// Number of records appended so far
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
