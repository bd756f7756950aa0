//! Core data types for the banking core
//!
//! This module contains all the fundamental types used throughout the system:
//!
//! - [`account`] - Accounts, account categories, identifiers
//! - [`transaction`] - Transfer requests and immutable ledger records
//! - [`loan`] - Loan applications and their lifecycle vocabulary
//! - [`identity`] - Verified caller identity and roles
//! - [`error`] - The error taxonomy with stable codes

pub mod account;
pub mod error;
pub mod identity;
pub mod loan;
pub mod transaction;

pub use account::{Account, AccountNumber, AccountType, CustomerId};
pub use error::{BankError, TransferParty};
pub use identity::{Caller, Role};
pub use loan::{
    default_annual_rate, LoanApplication, LoanId, LoanRequest, LoanStatus, LoanType, ReviewAction,
};
pub use transaction::{Direction, TransactionId, TransactionRecord, TransferRequest};
