//! Loan application types
//!
//! Defines the loan application aggregate, its category and status enums,
//! and the review action vocabulary. The lifecycle itself (who may move an
//! application between states, and when) lives in [`crate::core::loans`].

use crate::types::account::CustomerId;
use crate::types::error::BankError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Loan application identifier
pub type LoanId = u64;

/// Default annual interest rate, in percent, applied when the applicant
/// does not specify one.
pub fn default_annual_rate() -> Decimal {
    Decimal::new(120, 1) // 12.0
}

/// Loan categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanType {
    Personal,
    Home,
    Car,
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanType::Personal => write!(f, "PERSONAL"),
            LoanType::Home => write!(f, "HOME"),
            LoanType::Car => write!(f, "CAR"),
        }
    }
}

/// Loan application status
///
/// State machine: PENDING -> APPROVED or PENDING -> REJECTED. Both
/// outcomes are terminal; there is no reversal and no re-review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanStatus::Pending => write!(f, "PENDING"),
            LoanStatus::Approved => write!(f, "APPROVED"),
            LoanStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Recognized review actions
///
/// Anything else a reviewer submits fails to parse with
/// [`BankError::InvalidAction`], leaving the application untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// The status an application moves to under this action
    pub fn target_status(&self) -> LoanStatus {
        match self {
            ReviewAction::Approve => LoanStatus::Approved,
            ReviewAction::Reject => LoanStatus::Rejected,
        }
    }
}

impl FromStr for ReviewAction {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "APPROVE" => Ok(ReviewAction::Approve),
            "REJECT" => Ok(ReviewAction::Reject),
            _ => Err(BankError::invalid_action(s)),
        }
    }
}

/// Parameters for a new loan application
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    /// Loan category
    pub loan_type: LoanType,

    /// Principal amount; must be strictly positive
    pub principal: Decimal,

    /// Tenure in months; must be a positive integer
    pub tenure_months: u32,

    /// Annual interest rate in percent; defaults to 12.0 when absent
    pub annual_rate: Option<Decimal>,
}

/// A loan application
///
/// Created by customer action; `emi` is computed exactly once at creation
/// and never recomputed - the stored value is authoritative. `status` is
/// mutated only by an authorized reviewer, through the loan book.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    /// Application id
    pub id: LoanId,

    /// Applying customer, taken from the verified caller identity
    pub customer: CustomerId,

    /// Loan category
    pub loan_type: LoanType,

    /// Principal amount
    pub principal: Decimal,

    /// Tenure in months
    pub tenure_months: u32,

    /// Annual interest rate, in percent
    pub annual_rate: Decimal,

    /// Equated monthly installment, frozen at creation
    pub emi: Decimal,

    /// Current lifecycle status
    pub status: LoanStatus,

    /// When the application was filed
    pub applied_at: DateTime<Utc>,
}
