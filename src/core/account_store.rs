//! Account store with per-account exclusive locks
//!
//! This module provides the `AccountStore`, the in-process datastore for
//! accounts. Each account lives behind its own `Mutex`, which is the row
//! lock the transfer engine acquires (in ascending account-number order)
//! for the duration of an atomic transfer.
//!
//! # Thread Safety
//!
//! The index is a `DashMap`, so lookups and inserts from many threads are
//! safe. Handing out `Arc<Mutex<Account>>` handles keeps the index's shard
//! locks out of the picture while balances are being mutated: callers clone
//! the handle out and lock it without holding any map lock.
//!
//! # Account numbers
//!
//! New accounts draw random 12-digit numbers and retry on collision. The
//! retry loop is bounded: after [`NUMBER_RETRY_CAP`] failed draws the open
//! fails with a distinct error instead of spinning. With 9x10^11 possible
//! numbers the cap is unreachable until the store is essentially full.

use crate::types::{Account, AccountNumber, AccountType, BankError, CustomerId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

/// Maximum random draws before account number generation gives up
pub const NUMBER_RETRY_CAP: u32 = 32;

/// In-process account datastore
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<AccountNumber, Arc<Mutex<Account>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        AccountStore {
            accounts: DashMap::new(),
        }
    }

    /// Open a new account for `customer`
    ///
    /// Enforces the minimum opening deposit for the category (SAVINGS 500,
    /// CURRENT 1000, FIXED_DEPOSIT none) and assigns a fresh random
    /// 12-digit account number.
    ///
    /// # Errors
    ///
    /// - [`BankError::DepositBelowMinimum`] if the deposit is under the floor
    /// - [`BankError::AccountNumbersExhausted`] if no unique number could be
    ///   drawn within the retry cap
    pub fn open(
        &self,
        customer: &CustomerId,
        account_type: AccountType,
        initial_deposit: Decimal,
        opened_at: DateTime<Utc>,
    ) -> Result<Account, BankError> {
        let minimum = account_type.minimum_deposit();
        if initial_deposit < minimum {
            return Err(BankError::DepositBelowMinimum {
                account_type,
                minimum,
                offered: initial_deposit,
            });
        }

        let customer = customer.clone();
        self.insert_under_fresh_number(random_account_number, NUMBER_RETRY_CAP, |number| {
            Account::new(number, customer.clone(), account_type, initial_deposit, opened_at)
        })
    }

    /// Import an existing account, keeping its number
    ///
    /// Used when seeding the store from a book export. Fails if the number
    /// is already registered.
    pub fn register(&self, account: Account) -> Result<(), BankError> {
        use dashmap::mapref::entry::Entry;

        match self.accounts.entry(account.number.clone()) {
            Entry::Occupied(_) => Err(BankError::persistence(&format!(
                "account number already registered: {}",
                account.number
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    /// Row-lock handle for an account
    ///
    /// Returns `None` if the account does not exist. The caller locks the
    /// returned mutex for the duration of its read-modify-write.
    pub fn handle(&self, number: &AccountNumber) -> Option<Arc<Mutex<Account>>> {
        self.accounts.get(number).map(|entry| Arc::clone(&entry))
    }

    pub fn contains(&self, number: &AccountNumber) -> bool {
        self.accounts.contains_key(number)
    }

    /// Current balance, if the account exists
    pub fn balance_of(&self, number: &AccountNumber) -> Option<Decimal> {
        self.handle(number)
            .map(|h| h.lock().expect("account lock poisoned").balance)
    }

    /// Snapshot of all accounts
    ///
    /// Each account is locked briefly while it is copied; the snapshot as a
    /// whole is not a consistent cut across accounts.
    pub fn snapshot(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|entry| entry.value().lock().expect("account lock poisoned").clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Draw numbers from `draw` until one is unused, bounded by `cap`
    ///
    /// The account is inserted through the map's entry API while the shard
    /// lock for the candidate number is held, so two concurrent opens can
    /// never claim the same number.
    fn insert_under_fresh_number<F, M>(
        &self,
        mut draw: F,
        cap: u32,
        make: M,
    ) -> Result<Account, BankError>
    where
        F: FnMut() -> AccountNumber,
        M: Fn(AccountNumber) -> Account,
    {
        use dashmap::mapref::entry::Entry;

        for _ in 0..cap {
            let candidate = draw();
            match self.accounts.entry(candidate.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let account = make(candidate);
                    slot.insert(Arc::new(Mutex::new(account.clone())));
                    return Ok(account);
                }
            }
        }
        Err(BankError::AccountNumbersExhausted { attempts: cap })
    }
}

/// A uniformly random 12-digit account number
fn random_account_number() -> AccountNumber {
    rand::thread_rng()
        .gen_range(100_000_000_000u64..=999_999_999_999u64)
        .to_string()
}
