//! Transaction-related types for the banking core
//!
//! This module defines the immutable transaction record written to the
//! ledger for every committed transfer, and the request type the transfer
//! engine consumes.

use crate::types::account::{AccountNumber, CustomerId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger-assigned transaction identifier
pub type TransactionId = u64;

/// Direction tag recorded on a ledger entry
///
/// Transfers are recorded once, from the sender's perspective, as DEBIT.
/// CREDIT is reserved for system-initiated credits, which carry no sender
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Debit,
    Credit,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Debit => write!(f, "DEBIT"),
            Direction::Credit => write!(f, "CREDIT"),
        }
    }
}

/// A transfer instruction as handed to the ledger transfer engine
///
/// The calling layer (CSV driver, HTTP handler, test) builds one of these
/// per attempted move of funds. Validation happens inside the engine, in a
/// fixed order, so that the first failing check wins deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// Account to debit
    pub sender_account: AccountNumber,

    /// Account to credit
    pub receiver_account: AccountNumber,

    /// Amount to move; must be strictly positive
    pub amount: Decimal,

    /// Free-text remark carried onto the ledger record; may be empty
    pub remark: String,
}

/// Immutable ledger entry for a committed transfer
///
/// Created exactly once per successful transfer and never updated or
/// deleted - the ledger is the audit trail. Invariant: `sender_account`
/// and `receiver_account` always differ.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Ledger-assigned id, unique and monotonically increasing
    pub id: TransactionId,

    /// Sending customer
    ///
    /// `None` for system-initiated credits, which have no human sender.
    pub sender: Option<CustomerId>,

    /// Receiving customer
    pub receiver: CustomerId,

    /// Account that was debited
    pub sender_account: AccountNumber,

    /// Account that was credited
    pub receiver_account: AccountNumber,

    /// Amount moved; strictly positive
    pub amount: Decimal,

    /// Direction tag, recorded from the sender's perspective
    pub direction: Direction,

    /// Server-assigned timestamp; also determines the daily-limit window
    pub created_at: DateTime<Utc>,

    /// Free-text remark; may be empty
    pub remark: String,
}
