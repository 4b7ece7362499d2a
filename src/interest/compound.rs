use rust_decimal::Decimal;

use crate::config::InterestTerms;
use crate::decimal::{Money, Rate};

/// one-time annual compounding of an entry's principal
///
/// once an entry reaches `after_days` of age its interest-bearing principal
/// grows by `months` of simple monthly interest. The step is applied once; it
/// does not repeat for later years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundingRule {
    pub after_days: i64,
    pub months: u32,
}

impl CompoundingRule {
    pub fn new(after_days: i64, months: u32) -> Self {
        Self { after_days, months }
    }

    pub fn from_terms(terms: &InterestTerms) -> Self {
        Self::new(terms.compounding_after_days, terms.compounding_months)
    }

    /// whether an entry of this age has compounded
    pub fn applies(&self, days_passed: i64) -> bool {
        days_passed >= self.after_days
    }

    /// principal interest is charged against after `days_passed` days
    ///
    /// `None` when compounding would leave the representable range.
    pub fn applicable_principal(&self, amount: Money, monthly_rate: Rate, days_passed: i64) -> Option<Money> {
        if !self.applies(days_passed) {
            return Some(amount);
        }
        let growth = amount.checked_mul(monthly_rate.as_decimal() * Decimal::from(self.months))?;
        amount.checked_add(growth)
    }
}

impl Default for CompoundingRule {
    fn default() -> Self {
        Self::from_terms(&InterestTerms::default())
    }
}
