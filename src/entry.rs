use chrono::NaiveDate;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::LedgerEntry;

/// format users type dates in
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";
/// format interest math runs on
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// parse a `DD-MM-YYYY` display date
pub fn parse_display_date(display_date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(display_date, DISPLAY_DATE_FORMAT)
        .map_err(|e| LedgerError::invalid_date(display_date, e))
}

/// convert a `DD-MM-YYYY` display date to the ISO form stored in `date`
pub fn display_to_iso(display_date: &str) -> Result<String> {
    Ok(parse_display_date(display_date)?
        .format(ISO_DATE_FORMAT)
        .to_string())
}

#[derive(Debug, Clone)]
enum AmountInput {
    Text(String),
    Value(Money),
}

/// validated construction of new or edited ledger entries
#[derive(Debug, Clone, Default)]
pub struct LedgerEntryBuilder {
    id: Option<String>,
    serial_number: Option<String>,
    display_date: Option<String>,
    weight: Option<String>,
    amount: Option<AmountInput>,
}

impl LedgerEntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// start an edit from an existing entry
    ///
    /// entries without a display date fall back to their stored date.
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        let display_date = if entry.display_date.is_empty() {
            entry.date.clone()
        } else {
            entry.display_date.clone()
        };

        Self {
            id: entry.id.clone(),
            serial_number: Some(entry.serial_number.clone()),
            display_date: Some(display_date),
            weight: Some(entry.weight.clone()),
            amount: Some(AmountInput::Value(entry.amount)),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn display_date(mut self, date: impl Into<String>) -> Self {
        self.display_date = Some(date.into());
        self
    }

    pub fn weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// amount as typed into a form
    pub fn amount_text(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(AmountInput::Text(amount.into()));
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(AmountInput::Value(amount));
        self
    }

    pub fn build(self) -> Result<LedgerEntry> {
        let serial_number = required("serial_number", self.serial_number)?;
        let display_date = required("display_date", self.display_date)?;
        let weight = required("weight", self.weight)?;

        let amount = match self.amount {
            None => return Err(LedgerError::MissingField { field: "amount" }),
            Some(AmountInput::Value(amount)) => amount,
            Some(AmountInput::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(LedgerError::MissingField { field: "amount" });
                }
                Money::from_str_exact(text).map_err(|_| LedgerError::InvalidAmount {
                    value: text.to_string(),
                })?
            }
        };
        if amount.is_zero() || amount.is_negative() {
            return Err(LedgerError::InvalidAmount {
                value: amount.to_string(),
            });
        }

        let date = display_to_iso(&display_date)?;

        Ok(LedgerEntry {
            id: self.id,
            serial_number,
            display_date,
            date,
            weight,
            amount,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LedgerError::MissingField { field }),
    }
}
