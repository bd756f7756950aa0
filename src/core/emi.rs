//! Equated monthly installment calculator
//!
//! Pure amortization math: maps (principal, annual rate, tenure) to the
//! fixed monthly installment
//!
//! ```text
//! r   = annual_rate_percent / 12 / 100
//! EMI = principal * r * (1+r)^n / ((1+r)^n - 1)     (r > 0)
//! EMI = principal / n                               (r = 0)
//! ```
//!
//! The result is rounded to 2 decimal places with **round-half-up**
//! (`MidpointAwayFromZero`), the conventional mode for currency. The mode
//! is fixed and part of the contract; cent-level expectations in tests
//! depend on it.
//!
//! All arithmetic stays in `Decimal`. `(1+r)^n` is computed by iterated
//! multiplication, which is deterministic and avoids any float detour.

use crate::types::BankError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Compute the equated monthly installment
///
/// Deterministic and side-effect free: equal inputs always produce equal
/// output. Loan applications call this exactly once at creation and freeze
/// the result; re-invoking with the same inputs reproduces the stored
/// value.
///
/// # Arguments
///
/// * `principal` - loan amount, must be strictly positive
/// * `annual_rate_percent` - annual interest rate in percent, must be >= 0
/// * `tenure_months` - repayment period in months, must be > 0
///
/// # Errors
///
/// - [`BankError::InvalidAmount`] for a non-positive principal
/// - [`BankError::InvalidRate`] for a negative rate
/// - [`BankError::InvalidTenure`] for a zero tenure
pub fn compute_emi(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> Result<Decimal, BankError> {
    if principal <= Decimal::ZERO {
        return Err(BankError::invalid_amount(&principal.to_string()));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(BankError::InvalidRate {
            rate: annual_rate_percent,
        });
    }
    if tenure_months == 0 {
        return Err(BankError::InvalidTenure { months: 0 });
    }

    let n = Decimal::from(tenure_months);
    let monthly_rate = annual_rate_percent / Decimal::from(1200);

    let raw = if monthly_rate.is_zero() {
        principal / n
    } else {
        let growth = compound_factor(monthly_rate, tenure_months);
        principal * monthly_rate * growth / (growth - Decimal::ONE)
    };

    Ok(raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// `(1 + rate)^months` by iterated multiplication
fn compound_factor(rate: Decimal, months: u32) -> Decimal {
    let base = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..months {
        factor *= base;
    }
    factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_case_twelve_percent_one_year() {
        // P=100000, 12% annual -> r=0.01, n=12: closed form gives 8884.8788...
        let emi = compute_emi(dec("100000"), dec("12.0"), 12).unwrap();
        assert_eq!(emi, dec("8884.88"));
    }

    #[test]
    fn test_zero_rate_divides_principal_evenly() {
        let emi = compute_emi(dec("12000"), Decimal::ZERO, 12).unwrap();
        assert_eq!(emi, dec("1000.00"));
    }

    #[test]
    fn test_zero_rate_rounds_repeating_fraction() {
        // 1000 / 3 = 333.333... -> 333.33
        let emi = compute_emi(dec("1000"), Decimal::ZERO, 3).unwrap();
        assert_eq!(emi, dec("333.33"));
    }

    #[test]
    fn test_rounding_mode_is_half_up() {
        // 1 / 8 = 0.125 raw; half-up gives 0.13 where bankers' would give 0.12
        let emi = compute_emi(Decimal::ONE, Decimal::ZERO, 8).unwrap();
        assert_eq!(emi, dec("0.13"));
    }

    #[test]
    fn test_deterministic_across_calls() {
        let a = compute_emi(dec("250000"), dec("9.5"), 240).unwrap();
        let b = compute_emi(dec("250000"), dec("9.5"), 240).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_repayment_covers_principal() {
        // With interest, n * EMI must exceed the principal
        let principal = dec("500000");
        let emi = compute_emi(principal, dec("7.5"), 240).unwrap();
        assert!(emi * Decimal::from(240) > principal);

        // And each installment must at least cover the first month's interest,
        // otherwise the loan would never amortize
        let first_month_interest = principal * dec("7.5") / Decimal::from(1200);
        assert!(emi > first_month_interest);
    }

    #[rstest]
    #[case::zero_principal("0", "12.0", 12)]
    #[case::negative_principal("-100", "12.0", 12)]
    fn test_invalid_principal(#[case] principal: &str, #[case] rate: &str, #[case] months: u32) {
        let err = compute_emi(dec(principal), dec(rate), months).unwrap_err();
        assert!(matches!(err, BankError::InvalidAmount { .. }));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = compute_emi(dec("1000"), dec("-0.1"), 12).unwrap_err();
        assert_eq!(
            err,
            BankError::InvalidRate {
                rate: dec("-0.1")
            }
        );
    }

    #[test]
    fn test_zero_tenure_rejected() {
        let err = compute_emi(dec("1000"), dec("12.0"), 0).unwrap_err();
        assert_eq!(err, BankError::InvalidTenure { months: 0 });
    }
}
