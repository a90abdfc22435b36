//! Bank loans: borrowing, repayment and the automatic per-round payment

use crate::core::config::LoanConfig;
use crate::core::error::Rejected;
use crate::game::resources::{ResourceState, CREDIT_MAX};

/// Largest loan the bank will grant right now
pub fn loan_ceiling(resources: &ResourceState, config: &LoanConfig) -> f64 {
    resources.capital() as f64
        * config.ceiling_multiple
        * (resources.credit() as f64 / config.credit_reference)
}

/// Interest rate offered at the given credit score
pub fn interest_rate(credit: i32, config: &LoanConfig) -> f64 {
    config.base_interest + (1.0 - credit as f64 / CREDIT_MAX as f64) * config.interest_spread
}

/// Interest owed on the outstanding balance, rounded up
pub fn interest_due(resources: &ResourceState) -> i64 {
    (resources.loan_amount() as f64 * resources.loan_interest()).ceil() as i64
}

pub fn take_loan(
    resources: &mut ResourceState,
    amount: i64,
    config: &LoanConfig,
) -> Result<(), Rejected> {
    if amount <= 0 {
        return Err(Rejected::NonPositiveAmount);
    }
    let ceiling = loan_ceiling(resources, config);
    if amount as f64 > ceiling {
        return Err(Rejected::ExceedsLoanCeiling(ceiling.floor().max(0.0) as i64));
    }

    let rate = interest_rate(resources.credit(), config);
    resources.borrow(amount);
    resources.set_loan_interest(rate);
    Ok(())
}

pub fn repay_loan(
    resources: &mut ResourceState,
    amount: i64,
    config: &LoanConfig,
) -> Result<(), Rejected> {
    if amount <= 0 {
        return Err(Rejected::NonPositiveAmount);
    }
    if amount > resources.capital() {
        return Err(Rejected::ExceedsCapital);
    }

    let large = amount as f64 >= resources.loan_amount() as f64 * config.large_repayment_share;
    resources.pay_down(amount);
    resources.add_credit(if large {
        config.large_repayment_credit
    } else {
        config.small_repayment_credit
    });
    Ok(())
}

/// Deduct the automatic payment taken after every decision.
///
/// Returns the amount paid. Nothing is paid while capital is not positive.
pub fn auto_payment(resources: &mut ResourceState, config: &LoanConfig) -> i64 {
    if !resources.has_loan() {
        return 0;
    }
    let share = (resources.capital() as f64 * config.auto_payment_share).floor() as i64;
    let payment = resources.loan_amount().min(share);
    if payment <= 0 {
        return 0;
    }

    resources.pay_down(payment);
    if payment as f64 >= resources.loan_amount() as f64 * config.auto_payment_threshold {
        resources.add_credit(config.auto_payment_credit);
    }
    payment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{InitialConfig, TuningConfig};

    fn setup() -> (ResourceState, LoanConfig) {
        (
            ResourceState::initial(&InitialConfig::default()),
            TuningConfig::default().loans,
        )
    }

    #[test]
    fn test_loan_over_ceiling_rejected() {
        let (mut r, config) = setup();
        let before = r.clone();
        assert_eq!(
            take_loan(&mut r, 100_000, &config),
            Err(Rejected::ExceedsLoanCeiling(20_000))
        );
        assert_eq!(r, before);
    }

    #[test]
    fn test_loan_at_ceiling_accepted() {
        let (mut r, config) = setup();
        take_loan(&mut r, 20_000, &config).expect("ceiling is inclusive");
        assert_eq!(r.capital(), 30_000);
        assert_eq!(r.loan_amount(), 20_000);
        // 0.05 + (1 - 0.7) * 0.1
        assert!((r.loan_interest() - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let (mut r, config) = setup();
        assert_eq!(take_loan(&mut r, 0, &config), Err(Rejected::NonPositiveAmount));
        assert_eq!(repay_loan(&mut r, -5, &config), Err(Rejected::NonPositiveAmount));
    }

    #[test]
    fn test_repayment_credit_bonus_by_share() {
        let (mut r, config) = setup();
        take_loan(&mut r, 10_000, &config).unwrap();

        repay_loan(&mut r, 1_000, &config).unwrap();
        assert_eq!(r.credit(), 710);
        assert_eq!(r.loan_amount(), 9_000);

        repay_loan(&mut r, 500, &config).unwrap();
        assert_eq!(r.credit(), 715);
        assert_eq!(r.capital(), 18_500);
    }

    #[test]
    fn test_repayment_beyond_capital_rejected() {
        let (mut r, config) = setup();
        take_loan(&mut r, 1_000, &config).unwrap();
        assert_eq!(repay_loan(&mut r, 50_000, &config), Err(Rejected::ExceedsCapital));
    }

    #[test]
    fn test_repayment_without_loan_still_pays_out() {
        let (mut r, config) = setup();
        repay_loan(&mut r, 1_000, &config).expect("only amount and capital gate repayment");
        assert_eq!(r.capital(), 9_000);
        assert_eq!(r.loan_amount(), 0);
        assert_eq!(r.credit(), 710);
    }

    #[test]
    fn test_auto_payment_takes_five_percent_of_capital() {
        let (mut r, config) = setup();
        take_loan(&mut r, 10_000, &config).unwrap();
        let paid = auto_payment(&mut r, &config);
        assert_eq!(paid, 1_000);
        assert_eq!(r.capital(), 19_000);
        assert_eq!(r.loan_amount(), 9_000);
        assert_eq!(r.credit(), 710);
    }

    #[test]
    fn test_auto_payment_skipped_when_broke() {
        let (mut r, config) = setup();
        take_loan(&mut r, 1_000, &config).unwrap();
        r.set_capital(-500);
        assert_eq!(auto_payment(&mut r, &config), 0);
        assert_eq!(r.loan_amount(), 1_000);
    }

    #[test]
    fn test_interest_due_rounds_up() {
        let (mut r, config) = setup();
        take_loan(&mut r, 1_001, &config).unwrap();
        r.set_loan_interest(0.05);
        assert_eq!(interest_due(&r), 51);
    }
}
