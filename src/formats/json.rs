//! json support for store documents and computed views
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::{LedgerSummary, Totals};
use crate::types::{ComputedLedgerEntry, LedgerEntry};

/// parse one stored document
pub fn entry_from_json(json: &str) -> Result<LedgerEntry> {
    Ok(serde_json::from_str(json)?)
}

/// parse an array of stored documents
pub fn entries_from_json(json: &str) -> Result<Vec<LedgerEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// serializable snapshot of a computed ledger at one instant
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub evaluated_at: DateTime<Utc>,
    pub summary: LedgerSummary,
    pub totals: Totals,
    pub entries: Vec<ComputedLedgerEntry>,
}

impl LedgerView {
    pub fn new(entries: Vec<ComputedLedgerEntry>, evaluated_at: DateTime<Utc>) -> Self {
        LedgerView {
            evaluated_at,
            summary: LedgerSummary::from_entries(&entries),
            totals: Totals::from_entries(&entries),
            entries,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
