//! Loan lifecycle manager
//!
//! The `LoanBook` owns every loan application and is the only place their
//! status changes. The lifecycle is a three-state machine:
//!
//! ```text
//! PENDING ──APPROVE──> APPROVED   (terminal)
//!    └──────REJECT───> REJECTED   (terminal)
//! ```
//!
//! An application enters PENDING at creation, at which point its EMI is
//! computed once and frozen. Only callers carrying the reviewer role may
//! move an application out of PENDING, and once it has left PENDING any
//! further review attempt is rejected - there is no reversal and no
//! re-review.

use crate::core::clock::Clock;
use crate::core::emi::compute_emi;
use crate::types::{
    default_annual_rate, BankError, Caller, CustomerId, LoanApplication, LoanId, LoanRequest,
    LoanStatus, ReviewAction,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Loan application store and lifecycle authority
pub struct LoanBook {
    loans: DashMap<LoanId, LoanApplication>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl LoanBook {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        LoanBook {
            loans: DashMap::new(),
            next_id: AtomicU64::new(1),
            clock,
        }
    }

    /// File a new application for the calling customer
    ///
    /// The EMI is computed here, exactly once, and stored on the
    /// application; it is never recomputed afterwards. A request without an
    /// explicit rate uses the default 12.0% annual rate.
    ///
    /// # Errors
    ///
    /// Propagates the EMI calculator's validation errors for a non-positive
    /// principal, negative rate, or zero tenure.
    pub fn apply(
        &self,
        caller: &Caller,
        request: LoanRequest,
    ) -> Result<LoanApplication, BankError> {
        let annual_rate = request.annual_rate.unwrap_or_else(default_annual_rate);
        let emi = compute_emi(request.principal, annual_rate, request.tenure_months)?;

        let application = LoanApplication {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            customer: caller.customer.clone(),
            loan_type: request.loan_type,
            principal: request.principal,
            tenure_months: request.tenure_months,
            annual_rate,
            emi,
            status: LoanStatus::Pending,
            applied_at: self.clock.now(),
        };

        log::debug!(
            "loan application {} filed by {} ({} over {} months, emi {})",
            application.id,
            application.customer,
            application.principal,
            application.tenure_months,
            application.emi,
        );

        self.loans.insert(application.id, application.clone());
        Ok(application)
    }

    /// Review a pending application
    ///
    /// Requires the reviewer role; the authorization check runs before the
    /// application is even looked up, so an unauthorized caller learns
    /// nothing about which ids exist.
    ///
    /// # Errors
    ///
    /// - [`BankError::Unauthorized`] if the caller lacks the reviewer role
    /// - [`BankError::LoanNotFound`] for an unknown id
    /// - [`BankError::InvalidStateTransition`] if the application is no
    ///   longer PENDING
    pub fn review(
        &self,
        id: LoanId,
        action: ReviewAction,
        reviewer: &Caller,
    ) -> Result<LoanApplication, BankError> {
        if !reviewer.is_reviewer() {
            return Err(BankError::unauthorized(&reviewer.customer));
        }

        // get_mut holds the entry's shard lock, serializing concurrent
        // reviews of the same application
        let mut entry = self
            .loans
            .get_mut(&id)
            .ok_or(BankError::LoanNotFound { id })?;

        if entry.status != LoanStatus::Pending {
            return Err(BankError::invalid_state_transition(id, entry.status));
        }

        entry.status = action.target_status();
        log::info!(
            "loan application {} {} by {}",
            id,
            entry.status,
            reviewer.customer
        );
        Ok(entry.clone())
    }

    /// Fetch a single application
    pub fn get(&self, id: LoanId) -> Result<LoanApplication, BankError> {
        self.loans
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(BankError::LoanNotFound { id })
    }

    /// All applications filed by `customer`, oldest first
    pub fn list(&self, customer: &CustomerId) -> Vec<LoanApplication> {
        let mut applications: Vec<_> = self
            .loans
            .iter()
            .filter(|entry| &entry.customer == customer)
            .map(|entry| entry.clone())
            .collect();
        applications.sort_by_key(|a| a.id);
        applications
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::SystemClock;
    use crate::types::LoanType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn book() -> LoanBook {
        LoanBook::new(Arc::new(SystemClock))
    }

    fn request(principal: i64, months: u32) -> LoanRequest {
        LoanRequest {
            loan_type: LoanType::Personal,
            principal: Decimal::from(principal),
            tenure_months: months,
            annual_rate: None,
        }
    }

    #[test]
    fn test_apply_computes_and_freezes_emi() {
        let book = book();
        let alice = Caller::customer("alice@example.com");

        let application = book.apply(&alice, request(100_000, 12)).unwrap();

        assert_eq!(application.status, LoanStatus::Pending);
        assert_eq!(application.annual_rate, Decimal::from_str("12.0").unwrap());
        assert_eq!(application.emi, Decimal::from_str("8884.88").unwrap());

        // The stored value is authoritative: later reads see the same EMI
        let reread = book.get(application.id).unwrap();
        assert_eq!(reread.emi, application.emi);
    }

    #[test]
    fn test_apply_honors_explicit_rate() {
        let book = book();
        let alice = Caller::customer("alice@example.com");

        let application = book
            .apply(
                &alice,
                LoanRequest {
                    loan_type: LoanType::Car,
                    principal: Decimal::from(12_000),
                    tenure_months: 12,
                    annual_rate: Some(Decimal::ZERO),
                },
            )
            .unwrap();

        assert_eq!(application.emi, Decimal::from_str("1000.00").unwrap());
    }

    #[test]
    fn test_apply_rejects_invalid_principal() {
        let book = book();
        let alice = Caller::customer("alice@example.com");

        let err = book.apply(&alice, request(0, 12)).unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount { .. }));
        assert!(book.is_empty());
    }

    #[test]
    fn test_approve_is_terminal() {
        let book = book();
        let alice = Caller::customer("alice@example.com");
        let reviewer = Caller::reviewer("ops@bank.example");

        let application = book.apply(&alice, request(50_000, 24)).unwrap();

        let approved = book
            .review(application.id, ReviewAction::Approve, &reviewer)
            .unwrap();
        assert_eq!(approved.status, LoanStatus::Approved);

        // Re-reviewing in any direction is rejected and changes nothing
        for action in [ReviewAction::Approve, ReviewAction::Reject] {
            let err = book.review(application.id, action, &reviewer).unwrap_err();
            assert_eq!(
                err,
                BankError::invalid_state_transition(application.id, LoanStatus::Approved)
            );
        }
        assert_eq!(book.get(application.id).unwrap().status, LoanStatus::Approved);
    }

    #[test]
    fn test_reject_is_terminal() {
        let book = book();
        let alice = Caller::customer("alice@example.com");
        let reviewer = Caller::reviewer("ops@bank.example");

        let application = book.apply(&alice, request(50_000, 24)).unwrap();
        book.review(application.id, ReviewAction::Reject, &reviewer)
            .unwrap();

        let err = book
            .review(application.id, ReviewAction::Approve, &reviewer)
            .unwrap_err();
        assert!(matches!(err, BankError::InvalidStateTransition { .. }));
        assert_eq!(book.get(application.id).unwrap().status, LoanStatus::Rejected);
    }

    #[test]
    fn test_review_requires_reviewer_role() {
        let book = book();
        let alice = Caller::customer("alice@example.com");

        let application = book.apply(&alice, request(50_000, 24)).unwrap();

        // The applicant cannot review their own application
        let err = book
            .review(application.id, ReviewAction::Approve, &alice)
            .unwrap_err();
        assert_eq!(err, BankError::unauthorized("alice@example.com"));
        assert_eq!(book.get(application.id).unwrap().status, LoanStatus::Pending);
    }

    #[test]
    fn test_review_unknown_id() {
        let book = book();
        let reviewer = Caller::reviewer("ops@bank.example");

        let err = book.review(42, ReviewAction::Approve, &reviewer).unwrap_err();
        assert_eq!(err, BankError::LoanNotFound { id: 42 });
    }

    #[test]
    fn test_list_filters_by_customer_in_filing_order() {
        let book = book();
        let alice = Caller::customer("alice@example.com");
        let bob = Caller::customer("bob@example.com");

        let first = book.apply(&alice, request(10_000, 12)).unwrap();
        book.apply(&bob, request(20_000, 12)).unwrap();
        let second = book.apply(&alice, request(30_000, 36)).unwrap();

        let loans = book.list(&"alice@example.com".to_string());
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].id, first.id);
        assert_eq!(loans[1].id, second.id);

        assert!(book.list(&"carol@example.com".to_string()).is_empty());
    }

    #[test]
    fn test_concurrent_reviews_settle_exactly_once() {
        use std::thread;

        let book = Arc::new(book());
        let alice = Caller::customer("alice@example.com");
        let application = book.apply(&alice, request(50_000, 24)).unwrap();

        let mut handles = vec![];
        for i in 0..4 {
            let book = Arc::clone(&book);
            let id = application.id;
            handles.push(thread::spawn(move || {
                let reviewer = Caller::reviewer(&format!("ops{}@bank.example", i));
                let action = if i % 2 == 0 {
                    ReviewAction::Approve
                } else {
                    ReviewAction::Reject
                };
                book.review(id, action, &reviewer).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        // Exactly one reviewer wins; everyone else sees a terminal state
        assert_eq!(successes, 1);
        assert_ne!(book.get(application.id).unwrap().status, LoanStatus::Pending);
    }
}
