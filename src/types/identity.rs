//! Verified caller identity
//!
//! Authentication lives outside this crate. The core never trusts
//! client-supplied identifiers; it receives a [`Caller`] that the outer
//! layer has already verified, and only checks roles.

use crate::types::account::CustomerId;

/// Role attached to a verified caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular customer: may apply for loans and list their own
    Customer,
    /// Back-office reviewer: may approve or reject pending applications
    Reviewer,
}

/// A verified caller identity, as produced by the external auth layer
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    /// Customer id the outer layer authenticated
    pub customer: CustomerId,

    /// Role granted by the outer layer
    pub role: Role,
}

impl Caller {
    /// A caller with the customer role
    pub fn customer(customer: &str) -> Self {
        Caller {
            customer: customer.to_string(),
            role: Role::Customer,
        }
    }

    /// A caller with the reviewer role
    pub fn reviewer(customer: &str) -> Self {
        Caller {
            customer: customer.to_string(),
            role: Role::Reviewer,
        }
    }

    pub fn is_reviewer(&self) -> bool {
        self.role == Role::Reviewer
    }
}
