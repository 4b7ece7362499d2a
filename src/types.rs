use serde::{Deserialize, Serialize};

use crate::decimal::{money_number, rate_percent, Money, Rate};
use crate::interest::InterestBreakdown;

/// one ledger record as the document store holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// store document id, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub serial_number: String,
    /// as the user typed it, e.g. "28-07-2025"
    pub display_date: String,
    /// ISO "YYYY-MM-DD", the date all interest math runs on
    pub date: String,
    pub weight: String,
    #[serde(with = "money_number")]
    pub amount: Money,
}

/// a ledger entry with its interest fields evaluated at some instant
///
/// never persisted; recompute whenever "now" moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedLedgerEntry {
    #[serde(flatten)]
    pub entry: LedgerEntry,
    #[serde(with = "rate_percent")]
    pub interest_rate: Rate,
    #[serde(with = "money_number")]
    pub interest_applicable_amount: Money,
    #[serde(with = "money_number")]
    pub interest_today: Money,
    #[serde(with = "money_number")]
    pub total_payable: Money,
}

impl ComputedLedgerEntry {
    pub fn new(entry: LedgerEntry, interest: InterestBreakdown) -> Self {
        Self {
            entry,
            interest_rate: interest.rate,
            interest_applicable_amount: interest.applicable_principal,
            interest_today: interest.interest_today,
            total_payable: interest.total_payable,
        }
    }

    pub fn interest(&self) -> InterestBreakdown {
        InterestBreakdown {
            rate: self.interest_rate,
            applicable_principal: self.interest_applicable_amount,
            interest_today: self.interest_today,
            total_payable: self.total_payable,
        }
    }
}

/// anything ordered and searched by its serial number
pub trait SerialNumbered {
    fn serial_number(&self) -> &str;
}

impl SerialNumbered for LedgerEntry {
    fn serial_number(&self) -> &str {
        &self.serial_number
    }
}

impl SerialNumbered for ComputedLedgerEntry {
    fn serial_number(&self) -> &str {
        &self.entry.serial_number
    }
}

impl SerialNumbered for String {
    fn serial_number(&self) -> &str {
        self
    }
}

impl SerialNumbered for &str {
    fn serial_number(&self) -> &str {
        self
    }
}
