use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::config::InterestTerms;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::compound::CompoundingRule;
use crate::interest::InterestBreakdown;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// parse an entry's ISO `YYYY-MM-DD` date
pub fn parse_entry_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| LedgerError::invalid_date(date, e))
}

/// whole days from midnight UTC of `date` to `now`, floored
///
/// negative when the date lies after `now`.
pub fn days_passed(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (now - start).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// engine for accruing interest on ledger entries
#[derive(Debug, Clone, Default)]
pub struct AccrualEngine {
    pub terms: InterestTerms,
}

impl AccrualEngine {
    pub fn new(terms: InterestTerms) -> Self {
        Self { terms }
    }

    /// monthly rate for a principal
    pub fn interest_rate(&self, amount: Money) -> Rate {
        if amount > self.terms.rate_threshold {
            self.terms.reduced_rate
        } else {
            self.terms.standard_rate
        }
    }

    /// principal interest is charged against, after the annual compounding step
    pub fn applicable_principal(&self, amount: Money, rate: Rate, days_passed: i64) -> Result<Money> {
        CompoundingRule::from_terms(&self.terms)
            .applicable_principal(amount, rate, days_passed)
            .ok_or(LedgerError::AmountOutOfRange { amount })
    }

    /// interest attributed to the evaluation day
    ///
    /// young entries are charged a full month; older ones are prorated by the
    /// days elapsed in the current cycle.
    pub fn interest_today(&self, applicable: Money, rate: Rate, days_passed: i64) -> Result<Money> {
        let out_of_range = || LedgerError::AmountOutOfRange { amount: applicable };

        if days_passed < self.terms.full_month_window_days {
            return applicable.checked_mul(rate.as_decimal()).ok_or_else(out_of_range);
        }

        let cycle_days = days_passed % self.terms.cycle_days;
        let interest = applicable
            .as_decimal()
            .checked_mul(rate.as_decimal())
            .and_then(|d| d.checked_mul(Decimal::from(cycle_days)))
            .and_then(|d| d.checked_div(Decimal::from(self.terms.days_per_month)))
            .ok_or_else(out_of_range)?;
        Ok(Money::from_decimal(interest))
    }

    /// full breakdown for an entry of known age
    ///
    /// fails only when `amount` is so large the figures leave `Decimal`'s range.
    pub fn compute_for_days(&self, amount: Money, days_passed: i64) -> Result<InterestBreakdown> {
        let rate = self.interest_rate(amount);
        let applicable_principal = self.applicable_principal(amount, rate, days_passed)?;
        let interest_today = self.interest_today(applicable_principal, rate, days_passed)?;
        let total_payable = applicable_principal
            .checked_add(interest_today)
            .ok_or(LedgerError::AmountOutOfRange { amount })?;

        Ok(InterestBreakdown {
            rate,
            applicable_principal,
            interest_today,
            total_payable,
        })
    }

    /// evaluate an entry dated `date` at the instant `now`
    pub fn compute_at(&self, date: &str, amount: Money, now: DateTime<Utc>) -> Result<InterestBreakdown> {
        let entry_date = parse_entry_date(date)?;
        let days = days_passed(entry_date, now);
        tracing::trace!(date, %amount, days, "computing interest");
        self.compute_for_days(amount, days)
    }

    /// evaluate an entry at the time provider's current instant
    pub fn compute(
        &self,
        date: &str,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<InterestBreakdown> {
        self.compute_at(date, amount, time_provider.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn days_before(now: DateTime<Utc>, days: i64) -> String {
        (now.date_naive() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_rate_threshold() {
        let engine = AccrualEngine::default();

        assert_eq!(engine.interest_rate(Money::from_major(100)), Rate::from_bps(200));
        assert_eq!(engine.interest_rate(Money::from_major(30_000)), Rate::from_bps(200));
        assert_eq!(
            engine.interest_rate(Money::from_decimal(dec!(30000.01))),
            Rate::from_bps(175)
        );
        assert_eq!(engine.interest_rate(Money::from_major(40_000)), Rate::from_bps(175));
        assert_eq!(engine.interest_rate(Money::from_major(-5)), Rate::from_bps(200));
    }

    #[test]
    fn test_days_passed_floors() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(days_passed(date, now), 0);

        let now = Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(days_passed(date, now), 0);

        let now = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        assert_eq!(days_passed(date, now), 30);

        // future-dated entries round towards negative infinity
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap();
        assert_eq!(days_passed(date, now), -1);
    }

    #[test]
    fn test_invalid_dates_rejected() {
        let engine = AccrualEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        for bad in ["", "28-07-2025", "2025-02-30", "2025-13-01", "yesterday"] {
            let result = engine.compute_at(bad, Money::from_major(1_000), now);
            assert!(
                matches!(result, Err(LedgerError::InvalidDate { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_full_month_within_thirty_days() {
        let engine = AccrualEngine::default();
        let amount = Money::from_major(10_000);

        for days in [0, 1, 15, 29] {
            let result = engine.compute_for_days(amount, days).unwrap();
            assert_eq!(result.applicable_principal, amount);
            assert_eq!(result.interest_today, Money::from_major(200));
            assert_eq!(result.total_payable, Money::from_major(10_200));
        }
    }

    #[test]
    fn test_prorated_after_thirty_days() {
        let engine = AccrualEngine::default();
        let amount = Money::from_major(10_000);

        // 10000 * 2 * 45 / 3000
        let result = engine.compute_for_days(amount, 45).unwrap();
        assert_eq!(result.applicable_principal, amount);
        assert_eq!(result.interest_today, Money::from_major(300));
        assert_eq!(result.total_payable, Money::from_major(10_300));

        let result = engine.compute_for_days(amount, 30).unwrap();
        assert_eq!(result.interest_today, Money::from_major(200));

        let result = engine.compute_for_days(amount, 364).unwrap();
        assert_eq!(result.interest_today, Money::from_decimal(dec!(2426.66666667)));
    }

    #[test]
    fn test_cycle_restarts_after_a_year() {
        let engine = AccrualEngine::default();
        let amount = Money::from_major(10_000);

        // compounded to 12400, zero days into the new cycle
        let result = engine.compute_for_days(amount, 365).unwrap();
        assert_eq!(result.applicable_principal, Money::from_major(12_400));
        assert_eq!(result.interest_today, Money::ZERO);
        assert_eq!(result.total_payable, Money::from_major(12_400));

        // 12400 * 2 * 30 / 3000
        let result = engine.compute_for_days(amount, 395).unwrap();
        assert_eq!(result.interest_today, Money::from_major(248));
    }

    #[test]
    fn test_reduced_rate_scenario() {
        let engine = AccrualEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap();
        let date = days_before(now, 400);

        let result = engine.compute_at(&date, Money::from_major(40_000), now).unwrap();

        assert_eq!(result.rate.as_percentage(), dec!(1.75));
        assert_eq!(result.applicable_principal, Money::from_major(48_400));
        assert_eq!(result.interest_today.to_fixed(2), "988.17");
        assert_eq!(result.total_payable.to_fixed(2), "49388.17");
        assert_eq!(result.total_payable, result.applicable_principal + result.interest_today);
    }

    #[test]
    fn test_future_dates_use_same_formulas() {
        let engine = AccrualEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        // negative age falls inside the full-month window
        let result = engine
            .compute_at("2025-03-01", Money::from_major(10_000), now)
            .unwrap();
        assert_eq!(result.applicable_principal, Money::from_major(10_000));
        assert_eq!(result.interest_today, Money::from_major(200));
    }

    #[test]
    fn test_non_positive_amounts_do_not_fail() {
        let engine = AccrualEngine::default();

        let zero = engine.compute_for_days(Money::ZERO, 400).unwrap();
        assert_eq!(zero.total_payable, Money::ZERO);

        let negative = engine.compute_for_days(Money::from_major(-1_000), 10).unwrap();
        assert_eq!(negative.interest_today, Money::from_major(-20));
        assert_eq!(negative.total_payable, Money::from_major(-1_020));
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let engine = AccrualEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        let amount = Money::from_decimal(dec!(12345.67));

        let first = engine.compute_at("2024-02-29", amount, now).unwrap();
        let second = engine.compute_at("2024-02-29", amount, now).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.interest_today.as_decimal().serialize(),
            second.interest_today.as_decimal().serialize()
        );
    }

    #[test]
    fn test_accrual_with_time_manipulation() {
        let engine = AccrualEngine::default();
        let amount = Money::from_major(10_000);

        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        ));
        let control = time.test_control().unwrap();

        let result = engine.compute("2024-01-01", amount, &time).unwrap();
        assert_eq!(result.interest_today, Money::from_major(200));

        // 60 days in: 10000 * 2 * 60 / 3000
        control.advance(Duration::days(60));
        let result = engine.compute("2024-01-01", amount, &time).unwrap();
        assert_eq!(result.interest_today, Money::from_major(400));

        // past the first anniversary (2024 is a leap year, so 366 days)
        control.advance(Duration::days(306));
        let result = engine.compute("2024-01-01", amount, &time).unwrap();
        assert_eq!(result.applicable_principal, Money::from_major(12_400));
        // 12400 * 2 * 1 / 3000
        assert_eq!(result.interest_today, Money::from_decimal(dec!(8.26666667)));
    }

    #[test]
    fn test_huge_amounts_error_instead_of_panicking() {
        let engine = AccrualEngine::default();
        let now = Utc.with_ymd_and_hms(2025, 4, 11, 0, 0, 0).unwrap();
        let amount = Money::from_str_exact("50000000000000000000000000000").unwrap();

        // 100 days old: the prorated step is the one that overflows
        let result = engine.compute_at("2025-01-01", amount, now);
        assert!(matches!(result, Err(LedgerError::AmountOutOfRange { .. })));

        // past a year: the compounding step overflows first
        let amount = Money::from_str_exact("70000000000000000000000000000").unwrap();
        let result = engine.compute_at("2024-01-01", amount, now);
        assert!(matches!(result, Err(LedgerError::AmountOutOfRange { .. })));

        // a young entry still fits: 5e28 * 0.0175
        let result = engine.compute_for_days(Money::from_str_exact("50000000000000000000000000000").unwrap(), 5);
        assert!(result.is_ok());
    }

    #[test]
    fn test_custom_terms() {
        let terms = InterestTerms {
            rate_threshold: Money::from_major(1_000),
            ..InterestTerms::default()
        };
        let engine = AccrualEngine::new(terms);

        assert_eq!(engine.interest_rate(Money::from_major(5_000)), Rate::from_bps(175));
    }
}
