//! Error types for the banking core
//!
//! This module defines all error types that can occur in the ledger transfer
//! engine, the limit policy, the EMI calculator and the loan lifecycle manager.
//! Every failure is surfaced to the caller as a typed result - nothing is
//! silently swallowed.
//!
//! # Error Categories
//!
//! - **Validation Errors**: same-account transfers, malformed amounts, deposit floors
//! - **Not-Found Errors**: unknown accounts (sender or receiver), unknown loans
//! - **Policy Errors**: insufficient funds, daily limit exceeded
//! - **Lifecycle Errors**: invalid review actions, unauthorized callers, terminal states
//! - **Persistence Errors**: datastore failure during an atomic commit
//!
//! Each variant carries a stable machine-readable code (see [`BankError::code`])
//! so a calling layer can map errors to responses without string-matching.

use crate::types::account::AccountType;
use crate::types::loan::LoanStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// The side of a transfer an account reference belongs to
///
/// Used to report which of the two accounts in a transfer could not be
/// found, since the two cases must stay distinguishable for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferParty {
    Sender,
    Receiver,
}

impl std::fmt::Display for TransferParty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferParty::Sender => write!(f, "sender"),
            TransferParty::Receiver => write!(f, "receiver"),
        }
    }
}

/// Main error type for the banking core
///
/// This enum represents all possible errors that can occur while moving
/// funds or managing loan applications. Each variant includes relevant
/// context to help diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Sender and receiver reference the same account
    ///
    /// Always rejected, regardless of amount or balance.
    #[error("Sender and receiver account cannot be the same: {account}")]
    SameAccount {
        /// The account number used on both sides
        account: String,
    },

    /// An account referenced by a transfer does not exist
    #[error("{party} account not found: {account}")]
    AccountNotFound {
        /// The account number that was not found
        account: String,
        /// Which side of the transfer referenced it
        party: TransferParty,
    },

    /// Amount is malformed or not strictly positive
    #[error("Invalid amount '{amount}': transfer amounts must be positive")]
    InvalidAmount {
        /// The offending amount, as given
        amount: String,
    },

    /// Sender balance does not cover the requested amount
    ///
    /// The transfer is rejected and no balance changes.
    #[error(
        "Insufficient funds in account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Sender account number
        account: String,
        /// Current balance
        available: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// The transfer would push the sender over the daily outgoing ceiling
    ///
    /// The window is the calendar day of the transfer, not a rolling 24h span.
    #[error(
        "Daily transfer limit of {limit} exceeded for account {account}: sent {sent_today} today, requested {requested}"
    )]
    DailyLimitExceeded {
        /// Sender account number
        account: String,
        /// Configured ceiling
        limit: Decimal,
        /// Amount already sent during the current calendar day
        sent_today: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Opening deposit is below the floor for the account category
    #[error("Minimum initial deposit for {account_type} is {minimum}, got {offered}")]
    DepositBelowMinimum {
        /// Category being opened
        account_type: AccountType,
        /// Required floor
        minimum: Decimal,
        /// Deposit offered
        offered: Decimal,
    },

    /// Account number generation gave up after the retry cap
    ///
    /// Practically unreachable with a 12-digit space, but the generator is
    /// bounded so a saturated store fails loudly instead of spinning.
    #[error("Could not generate a unique account number after {attempts} attempts")]
    AccountNumbersExhausted {
        /// Number of draws attempted
        attempts: u32,
    },

    /// No loan application with the given id
    #[error("Loan application {id} not found")]
    LoanNotFound {
        /// Application id
        id: u64,
    },

    /// Review action is neither APPROVE nor REJECT
    #[error("Invalid review action '{action}': expected APPROVE or REJECT")]
    InvalidAction {
        /// The unrecognized action string
        action: String,
    },

    /// Caller lacks the role required for the operation
    #[error("Caller {customer} is not authorized to review loan applications")]
    Unauthorized {
        /// Caller's customer id
        customer: String,
    },

    /// Loan application has already left the PENDING state
    ///
    /// APPROVED and REJECTED are terminal - no reversal, no re-review.
    #[error("Loan application {id} is already {status} and cannot be reviewed again")]
    InvalidStateTransition {
        /// Application id
        id: u64,
        /// Current (terminal) status
        status: LoanStatus,
    },

    /// Loan tenure must be a positive number of months
    #[error("Invalid loan tenure: {months} months")]
    InvalidTenure {
        /// The offending tenure
        months: u32,
    },

    /// Annual interest rate must not be negative
    #[error("Invalid interest rate: {rate}%")]
    InvalidRate {
        /// The offending rate, in percent
        rate: Decimal,
    },

    /// Datastore failure during an atomic commit
    ///
    /// Fatal to the request; every write in the atomic scope has been rolled
    /// back. Retrying is the caller's responsibility.
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description of the underlying failure
        message: String,
    },

    /// Malformed input row in a CSV instruction or seed file
    ///
    /// Recoverable - the row is skipped and processing continues.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Anything the datastore layer raises while committing is a persistence
// failure from the core's point of view.
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Persistence {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create a SameAccount error
    pub fn same_account(account: &str) -> Self {
        BankError::SameAccount {
            account: account.to_string(),
        }
    }

    /// Create an AccountNotFound error for the sending side
    pub fn sender_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
            party: TransferParty::Sender,
        }
    }

    /// Create an AccountNotFound error for the receiving side
    pub fn receiver_not_found(account: &str) -> Self {
        BankError::AccountNotFound {
            account: account.to_string(),
            party: TransferParty::Receiver,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        BankError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create a DailyLimitExceeded error
    pub fn daily_limit_exceeded(
        account: &str,
        limit: Decimal,
        sent_today: Decimal,
        requested: Decimal,
    ) -> Self {
        BankError::DailyLimitExceeded {
            account: account.to_string(),
            limit,
            sent_today,
            requested,
        }
    }

    /// Create an InvalidAction error
    pub fn invalid_action(action: &str) -> Self {
        BankError::InvalidAction {
            action: action.to_string(),
        }
    }

    /// Create an Unauthorized error
    pub fn unauthorized(customer: &str) -> Self {
        BankError::Unauthorized {
            customer: customer.to_string(),
        }
    }

    /// Create an InvalidStateTransition error
    pub fn invalid_state_transition(id: u64, status: LoanStatus) -> Self {
        BankError::InvalidStateTransition { id, status }
    }

    /// Create a Persistence error
    pub fn persistence(message: &str) -> Self {
        BankError::Persistence {
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code for this error kind
    ///
    /// Codes are part of the crate's contract: a calling layer can switch on
    /// them to render responses without matching on message text.
    pub fn code(&self) -> &'static str {
        match self {
            BankError::SameAccount { .. } => "SAME_ACCOUNT",
            BankError::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            BankError::InvalidAmount { .. } => "INVALID_AMOUNT",
            BankError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            BankError::DailyLimitExceeded { .. } => "DAILY_LIMIT_EXCEEDED",
            BankError::DepositBelowMinimum { .. } => "DEPOSIT_BELOW_MINIMUM",
            BankError::AccountNumbersExhausted { .. } => "ACCOUNT_NUMBERS_EXHAUSTED",
            BankError::LoanNotFound { .. } => "LOAN_NOT_FOUND",
            BankError::InvalidAction { .. } => "INVALID_ACTION",
            BankError::Unauthorized { .. } => "UNAUTHORIZED",
            BankError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            BankError::InvalidTenure { .. } => "INVALID_TENURE",
            BankError::InvalidRate { .. } => "INVALID_RATE",
            BankError::Persistence { .. } => "PERSISTENCE_ERROR",
            BankError::Parse { .. } => "PARSE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::same_account(
        BankError::same_account("111122223333"),
        "Sender and receiver account cannot be the same: 111122223333"
    )]
    #[case::sender_not_found(
        BankError::sender_not_found("111122223333"),
        "sender account not found: 111122223333"
    )]
    #[case::receiver_not_found(
        BankError::receiver_not_found("444455556666"),
        "receiver account not found: 444455556666"
    )]
    #[case::invalid_amount(
        BankError::invalid_amount("-5"),
        "Invalid amount '-5': transfer amounts must be positive"
    )]
    #[case::insufficient_funds(
        BankError::insufficient_funds("111122223333", Decimal::new(5000, 2), Decimal::new(10000, 2)),
        "Insufficient funds in account 111122223333: available 50.00, requested 100.00"
    )]
    #[case::daily_limit(
        BankError::daily_limit_exceeded(
            "111122223333",
            Decimal::from(100_000),
            Decimal::from(99_000),
            Decimal::from(2_000),
        ),
        "Daily transfer limit of 100000 exceeded for account 111122223333: sent 99000 today, requested 2000"
    )]
    #[case::invalid_action(
        BankError::invalid_action("ESCALATE"),
        "Invalid review action 'ESCALATE': expected APPROVE or REJECT"
    )]
    #[case::unauthorized(
        BankError::unauthorized("alice@example.com"),
        "Caller alice@example.com is not authorized to review loan applications"
    )]
    #[case::invalid_state_transition(
        BankError::invalid_state_transition(7, LoanStatus::Approved),
        "Loan application 7 is already APPROVED and cannot be reviewed again"
    )]
    #[case::persistence(
        BankError::persistence("journal write failed"),
        "Persistence error: journal write failed"
    )]
    #[case::parse_with_line(
        BankError::Parse { line: Some(42), message: "bad row".to_string() },
        "Parse error at line 42: bad row"
    )]
    fn test_error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case(BankError::same_account("1"), "SAME_ACCOUNT")]
    #[case(BankError::sender_not_found("1"), "ACCOUNT_NOT_FOUND")]
    #[case(BankError::receiver_not_found("1"), "ACCOUNT_NOT_FOUND")]
    #[case(BankError::invalid_amount("x"), "INVALID_AMOUNT")]
    #[case(
        BankError::insufficient_funds("1", Decimal::ZERO, Decimal::ONE),
        "INSUFFICIENT_FUNDS"
    )]
    #[case(
        BankError::daily_limit_exceeded("1", Decimal::ONE, Decimal::ONE, Decimal::ONE),
        "DAILY_LIMIT_EXCEEDED"
    )]
    #[case(BankError::invalid_action("x"), "INVALID_ACTION")]
    #[case(BankError::unauthorized("x"), "UNAUTHORIZED")]
    #[case(
        BankError::invalid_state_transition(1, LoanStatus::Rejected),
        "INVALID_STATE_TRANSITION"
    )]
    #[case(BankError::persistence("x"), "PERSISTENCE_ERROR")]
    fn test_error_codes_are_stable(#[case] error: BankError, #[case] code: &str) {
        assert_eq!(error.code(), code);
    }

    #[test]
    fn test_codes_distinguish_error_kinds() {
        let errors = [
            BankError::same_account("1"),
            BankError::sender_not_found("1"),
            BankError::invalid_amount("x"),
            BankError::insufficient_funds("1", Decimal::ZERO, Decimal::ONE),
            BankError::daily_limit_exceeded("1", Decimal::ONE, Decimal::ZERO, Decimal::ONE),
            BankError::invalid_action("x"),
            BankError::unauthorized("x"),
            BankError::invalid_state_transition(1, LoanStatus::Approved),
            BankError::persistence("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Persistence { .. }));
        assert_eq!(error.to_string(), "Persistence error: Permission denied");
    }
}
