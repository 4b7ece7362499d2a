use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// business rules the accrual engine applies to every entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestTerms {
    /// principal above which the reduced rate applies (the threshold itself takes the standard rate)
    pub rate_threshold: Money,
    /// monthly rate for principals up to the threshold
    pub standard_rate: Rate,
    /// monthly rate for principals above the threshold
    pub reduced_rate: Rate,
    /// age in days at which the principal compounds for one year
    pub compounding_after_days: i64,
    /// months of interest added by the compounding step
    pub compounding_months: u32,
    /// entries younger than this are charged a full month
    pub full_month_window_days: i64,
    /// days per interest month when prorating
    pub days_per_month: u32,
    /// length of the accrual cycle prorated days are taken modulo
    pub cycle_days: i64,
}

impl Default for InterestTerms {
    fn default() -> Self {
        Self {
            rate_threshold: Money::from_major(30_000),
            standard_rate: Rate::from_percent(dec!(2)),
            reduced_rate: Rate::from_percent(dec!(1.75)),
            compounding_after_days: 365,
            compounding_months: 12,
            full_month_window_days: 30,
            days_per_month: 30,
            cycle_days: 365,
        }
    }
}

impl InterestTerms {
    /// load terms from a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: InterestTerms = serde_json::from_str(json)?;
        terms.validate()?;
        Ok(terms)
    }

    /// reject terms the accrual formulas cannot divide by
    pub fn validate(&self) -> Result<()> {
        if self.days_per_month == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "days_per_month must be positive".to_string(),
            });
        }
        if self.cycle_days <= 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "cycle_days must be positive".to_string(),
            });
        }
        Ok(())
    }
}
