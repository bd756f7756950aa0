//! Daily transfer limit policy
//!
//! Caps the cumulative amount an account may send per calendar day. The
//! window is the calendar date of the server-assigned timestamp, not a
//! rolling 24-hour span: a transfer at 23:59 and another at 00:01 the next
//! day fall into different windows.
//!
//! The policy itself is a pure comparison. The consistency guarantee - no
//! two committed transfers for the same account on the same day may jointly
//! exceed the ceiling - comes from the engine evaluating the check while it
//! holds the sender's row lock, so check and commit are one atomic step.

use crate::types::BankError;
use rust_decimal::Decimal;

/// Default daily outgoing ceiling per account
pub fn default_daily_limit() -> Decimal {
    Decimal::from(100_000)
}

/// Daily outgoing transfer ceiling
#[derive(Debug, Clone, PartialEq)]
pub struct LimitPolicy {
    daily_limit: Decimal,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        LimitPolicy {
            daily_limit: default_daily_limit(),
        }
    }
}

impl LimitPolicy {
    /// A policy with a custom ceiling
    pub fn new(daily_limit: Decimal) -> Self {
        LimitPolicy { daily_limit }
    }

    /// The configured ceiling
    pub fn daily_limit(&self) -> Decimal {
        self.daily_limit
    }

    /// Check whether `amount` still fits under today's ceiling
    ///
    /// `sent_today` is the sum of amounts already committed with this
    /// account as sender during the current calendar day; the caller reads
    /// it from the journal inside the same atomic scope as the transfer.
    ///
    /// # Errors
    ///
    /// [`BankError::DailyLimitExceeded`] if `sent_today + amount` would
    /// exceed the ceiling. Exactly reaching the ceiling is allowed.
    pub fn check(
        &self,
        account: &str,
        sent_today: Decimal,
        amount: Decimal,
    ) -> Result<(), BankError> {
        if sent_today + amount > self.daily_limit {
            return Err(BankError::daily_limit_exceeded(
                account,
                self.daily_limit,
                sent_today,
                amount,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::well_under(0, 1, false)]
    #[case::exactly_at_limit(40_000, 60_000, false)]
    #[case::one_over(40_000, 60_001, true)]
    #[case::already_at_limit(100_000, 1, true)]
    #[case::single_oversized(0, 100_001, true)]
    fn test_default_ceiling(
        #[case] sent_today: i64,
        #[case] amount: i64,
        #[case] rejected: bool,
    ) {
        let policy = LimitPolicy::default();
        let result = policy.check(
            "111122223333",
            Decimal::from(sent_today),
            Decimal::from(amount),
        );
        assert_eq!(result.is_err(), rejected);
    }

    #[test]
    fn test_custom_ceiling() {
        let policy = LimitPolicy::new(Decimal::from(500));

        assert!(policy
            .check("1", Decimal::from(200), Decimal::from(300))
            .is_ok());

        let err = policy
            .check("1", Decimal::from(200), Decimal::from(301))
            .unwrap_err();
        assert_eq!(
            err,
            BankError::daily_limit_exceeded(
                "1",
                Decimal::from(500),
                Decimal::from(200),
                Decimal::from(301),
            )
        );
    }

    #[test]
    fn test_error_carries_context() {
        let policy = LimitPolicy::default();
        let err = policy
            .check("111122223333", Decimal::from(99_000), Decimal::from(2_000))
            .unwrap_err();

        match err {
            BankError::DailyLimitExceeded {
                account,
                limit,
                sent_today,
                requested,
            } => {
                assert_eq!(account, "111122223333");
                assert_eq!(limit, Decimal::from(100_000));
                assert_eq!(sent_today, Decimal::from(99_000));
                assert_eq!(requested, Decimal::from(2_000));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
