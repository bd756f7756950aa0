//! In-memory transaction log
//!
//! This module provides the `TransactionLog`, the crate's default
//! [`Journal`] implementation: an append-only record store with an index of
//! per-day outgoing totals for the limit policy.
//!
//! # Thread Safety
//!
//! Appends take the log's write lock; the daily totals live in a `DashMap`
//! keyed by `(account, day)`. The engine additionally holds the sender's
//! account lock across the limit check and the append, so two transfers
//! from the same account can never interleave between reading the total and
//! writing the record.

use crate::core::journal::Journal;
use crate::types::{AccountNumber, BankError, Direction, TransactionRecord};
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Append-only, in-memory transaction log
#[derive(Debug)]
pub struct TransactionLog {
    /// All records, in commit order
    records: RwLock<Vec<TransactionRecord>>,

    /// Outgoing totals per sender account and calendar day
    ///
    /// Maintained on append; only DEBIT records (sender-perspective
    /// transfers) contribute.
    daily_sent: DashMap<(AccountNumber, NaiveDate), Decimal>,

    /// Next ledger id; ids start at 1
    next_id: AtomicU64,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog {
            records: RwLock::new(Vec::new()),
            daily_sent: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Snapshot of every record, in commit order
    pub fn all_records(&self) -> Vec<TransactionRecord> {
        self.records.read().expect("ledger lock poisoned").clone()
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal for TransactionLog {
    fn append(&self, mut record: TransactionRecord) -> Result<TransactionRecord, BankError> {
        record.id = self.next_id.fetch_add(1, Ordering::Relaxed);

        {
            let mut records = self.records.write().expect("ledger lock poisoned");
            records.push(record.clone());
        }

        if record.direction == Direction::Debit {
            let key = (record.sender_account.clone(), record.created_at.date_naive());
            let mut total = self.daily_sent.entry(key).or_insert(Decimal::ZERO);
            *total += record.amount;
        }

        Ok(record)
    }

    fn sent_total_on(&self, account: &AccountNumber, day: NaiveDate) -> Decimal {
        self.daily_sent
            .get(&(account.clone(), day))
            .map(|total| *total)
            .unwrap_or(Decimal::ZERO)
    }

    fn statement(&self, account: &AccountNumber) -> Vec<TransactionRecord> {
        self.records
            .read()
            .expect("ledger lock poisoned")
            .iter()
            .filter(|r| &r.sender_account == account || &r.receiver_account == account)
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.records.read().expect("ledger lock poisoned").len()
    }
}
