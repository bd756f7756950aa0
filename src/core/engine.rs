//! Ledger transfer engine
//!
//! This module provides the `LedgerEngine`, which orchestrates a single
//! transfer of funds between two accounts: validation, locking, balance
//! mutation and the write of one immutable ledger record.
//!
//! # Validation order
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. sender and receiver must differ
//! 2. the amount must be strictly positive
//! 3. the sender account must exist, then the receiver account
//! 4. the sender balance must cover the amount
//! 5. the daily limit must not be exceeded
//!
//! # Atomicity and locking
//!
//! Both account rows are locked for the whole execution, acquired in
//! ascending account-number order so that two transfers exchanging the
//! same pair of accounts in opposite directions can never deadlock. The
//! funds check, the limit check, both balance mutations and the journal
//! append all happen under those locks: no other transfer can observe a
//! half-applied state, and per-account balance history is totally ordered.
//!
//! If the journal append fails, both balance mutations are rolled back
//! before the locks are released - the caller sees one error and a store
//! that looks as if the transfer was never attempted.

use crate::core::account_store::AccountStore;
use crate::core::clock::{Clock, SystemClock};
use crate::core::journal::Journal;
use crate::core::ledger::TransactionLog;
use crate::core::limits::LimitPolicy;
use crate::types::{
    Account, AccountNumber, AccountType, BankError, CustomerId, Direction, TransactionRecord,
    TransferRequest,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Orchestrates atomic transfers against the account store and journal
pub struct LedgerEngine {
    accounts: AccountStore,
    journal: Arc<dyn Journal>,
    limits: LimitPolicy,
    clock: Arc<dyn Clock>,
}

impl LedgerEngine {
    /// Create an engine over explicit collaborators
    pub fn new(journal: Arc<dyn Journal>, limits: LimitPolicy, clock: Arc<dyn Clock>) -> Self {
        LedgerEngine {
            accounts: AccountStore::new(),
            journal,
            limits,
            clock,
        }
    }

    /// Engine with an in-memory journal, default limits and the wall clock
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(TransactionLog::new()),
            LimitPolicy::default(),
            Arc::new(SystemClock),
        )
    }

    /// Engine with a custom daily limit, otherwise defaults
    pub fn with_daily_limit(daily_limit: Decimal) -> Self {
        Self::new(
            Arc::new(TransactionLog::new()),
            LimitPolicy::new(daily_limit),
            Arc::new(SystemClock),
        )
    }

    /// The underlying account store
    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Open a new account (floor-checked, fresh random number)
    pub fn open_account(
        &self,
        customer: &CustomerId,
        account_type: AccountType,
        initial_deposit: Decimal,
    ) -> Result<Account, BankError> {
        self.accounts
            .open(customer, account_type, initial_deposit, self.clock.now())
    }

    /// Import an existing account, keeping its number
    pub fn register_account(&self, account: Account) -> Result<(), BankError> {
        self.accounts.register(account)
    }

    /// Current balance of an account
    pub fn balance_of(&self, number: &AccountNumber) -> Option<Decimal> {
        self.accounts.balance_of(number)
    }

    /// Every ledger record in which the account participated
    pub fn statement(&self, number: &AccountNumber) -> Vec<TransactionRecord> {
        self.journal.statement(number)
    }

    /// Move funds between two accounts
    ///
    /// On success exactly one DEBIT record has been appended to the
    /// journal and both balances reflect the move. On any failure nothing
    /// has changed.
    ///
    /// # Errors
    ///
    /// - [`BankError::SameAccount`] if sender and receiver are the same
    /// - [`BankError::InvalidAmount`] for a non-positive amount
    /// - [`BankError::AccountNotFound`] for a missing sender or receiver
    /// - [`BankError::InsufficientFunds`] if the sender cannot cover it
    /// - [`BankError::DailyLimitExceeded`] if today's ceiling would be broken
    /// - [`BankError::Persistence`] if the journal rejects the record; the
    ///   balance mutations have been rolled back
    pub fn transfer(&self, request: &TransferRequest) -> Result<TransactionRecord, BankError> {
        if request.sender_account == request.receiver_account {
            return Err(BankError::same_account(&request.sender_account));
        }

        if request.amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(&request.amount.to_string()));
        }

        let sender_handle = self
            .accounts
            .handle(&request.sender_account)
            .ok_or_else(|| BankError::sender_not_found(&request.sender_account))?;
        let receiver_handle = self
            .accounts
            .handle(&request.receiver_account)
            .ok_or_else(|| BankError::receiver_not_found(&request.receiver_account))?;

        // Row locks in ascending account-number order; the reverse pair
        // acquires them in the same order, so no deadlock cycle can form.
        let sender_first = request.sender_account < request.receiver_account;
        let (first, second) = if sender_first {
            (&sender_handle, &receiver_handle)
        } else {
            (&receiver_handle, &sender_handle)
        };
        let first_guard = first.lock().expect("account lock poisoned");
        let second_guard = second.lock().expect("account lock poisoned");
        let (mut sender, mut receiver) = if sender_first {
            (first_guard, second_guard)
        } else {
            (second_guard, first_guard)
        };

        if sender.balance < request.amount {
            return Err(BankError::insufficient_funds(
                &request.sender_account,
                sender.balance,
                request.amount,
            ));
        }

        // One clock read serves both the limit window and the record
        // timestamp, so the committed record always lands in the window
        // it was checked against.
        let now = self.clock.now();
        let sent_today = self
            .journal
            .sent_total_on(&request.sender_account, now.date_naive());
        self.limits
            .check(&request.sender_account, sent_today, request.amount)?;

        // Debit, credit, then journal - still under both locks
        sender.balance -= request.amount;
        receiver.balance += request.amount;

        let record = TransactionRecord {
            id: 0, // assigned by the journal
            sender: Some(sender.customer.clone()),
            receiver: receiver.customer.clone(),
            sender_account: request.sender_account.clone(),
            receiver_account: request.receiver_account.clone(),
            amount: request.amount,
            direction: Direction::Debit,
            created_at: now,
            remark: request.remark.clone(),
        };

        match self.journal.append(record) {
            Ok(stored) => {
                log::debug!(
                    "transfer {}: {} -> {} amount {}",
                    stored.id,
                    stored.sender_account,
                    stored.receiver_account,
                    stored.amount
                );
                Ok(stored)
            }
            Err(err) => {
                // Roll back both mutations before the locks drop; no other
                // reader ever saw the intermediate balances.
                sender.balance += request.amount;
                receiver.balance -= request.amount;
                log::error!(
                    "journal append failed for {} -> {}: {}; transfer rolled back",
                    request.sender_account,
                    request.receiver_account,
                    err
                );
                Err(err)
            }
        }
    }
}
