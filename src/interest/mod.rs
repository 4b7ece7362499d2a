pub mod accrual;
pub mod compound;

use chrono::{DateTime, Utc};

use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use accrual::{days_passed, parse_entry_date, AccrualEngine};
pub use compound::CompoundingRule;

/// interest figures for one entry at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestBreakdown {
    /// monthly rate selected for the principal
    pub rate: Rate,
    /// principal after the annual compounding step
    pub applicable_principal: Money,
    pub interest_today: Money,
    /// applicable principal plus interest today
    pub total_payable: Money,
}

/// compute interest under the default terms
pub fn compute_interest(date: &str, amount: Money, now: DateTime<Utc>) -> Result<InterestBreakdown> {
    AccrualEngine::default().compute_at(date, amount, now)
}
