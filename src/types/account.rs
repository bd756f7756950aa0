//! Account-related types for the banking core
//!
//! This module defines the Account structure and account categories
//! used by the account store and the ledger transfer engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account number
///
/// A 12-digit numeric string, unique and immutable once assigned.
pub type AccountNumber = String;

/// Customer identifier
///
/// Opaque reference to the owning customer, handed in by the (external)
/// identity layer. Typically an email address.
pub type CustomerId = String;

/// Account categories
///
/// Categories differ only in their minimum opening deposit; the transfer
/// path treats them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
    FixedDeposit,
}

impl AccountType {
    /// Minimum initial deposit required to open an account of this category
    ///
    /// Fixed-deposit accounts have no floor.
    pub fn minimum_deposit(&self) -> Decimal {
        match self {
            AccountType::Savings => Decimal::from(500),
            AccountType::Current => Decimal::from(1000),
            AccountType::FixedDeposit => Decimal::ZERO,
        }
    }

    /// Parse a category from its wire name, case-insensitively
    ///
    /// Returns `None` for unrecognized names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SAVINGS" => Some(AccountType::Savings),
            "CURRENT" => Some(AccountType::Current),
            "FIXED_DEPOSIT" => Some(AccountType::FixedDeposit),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Savings => write!(f, "SAVINGS"),
            AccountType::Current => write!(f, "CURRENT"),
            AccountType::FixedDeposit => write!(f, "FIXED_DEPOSIT"),
        }
    }
}

/// Bank account state
///
/// Owned by the account store; balance is mutated only through the ledger
/// transfer engine's atomic update path. The balance invariant (never
/// negative after a committed transfer) is enforced by the engine, which
/// checks funds while holding the account's exclusive lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique 12-digit account number, immutable once assigned
    pub number: AccountNumber,

    /// Owning customer
    pub customer: CustomerId,

    /// Account category
    pub account_type: AccountType,

    /// Current balance
    ///
    /// Fixed-point decimal; never negative after a committed transfer.
    pub balance: Decimal,

    /// When the account was opened
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with the given opening balance
    pub fn new(
        number: AccountNumber,
        customer: CustomerId,
        account_type: AccountType,
        balance: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Account {
            number,
            customer,
            account_type,
            balance,
            created_at,
        }
    }
}
