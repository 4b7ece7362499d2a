use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{money_number, Money};
use crate::errors::Result;
use crate::interest::AccrualEngine;
use crate::serial::{parse_search_expression, sort_by_serial};
use crate::types::{ComputedLedgerEntry, LedgerEntry};

/// stateless workflows over batches of ledger entries
///
/// every call recomputes from scratch against the instant it is given.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub engine: AccrualEngine,
}

impl Ledger {
    pub fn new(engine: AccrualEngine) -> Self {
        Self { engine }
    }

    pub fn compute_entry_at(&self, entry: LedgerEntry, now: DateTime<Utc>) -> Result<ComputedLedgerEntry> {
        let interest = self.engine.compute_at(&entry.date, entry.amount, now)?;
        Ok(ComputedLedgerEntry::new(entry, interest))
    }

    pub fn compute_entry(
        &self,
        entry: LedgerEntry,
        time_provider: &SafeTimeProvider,
    ) -> Result<ComputedLedgerEntry> {
        self.compute_entry_at(entry, time_provider.now())
    }

    /// enrich a batch in input order; the first bad date fails the batch
    pub fn compute_entries_at(
        &self,
        entries: Vec<LedgerEntry>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ComputedLedgerEntry>> {
        tracing::debug!(count = entries.len(), %now, "computing ledger entries");
        entries
            .into_iter()
            .map(|entry| self.compute_entry_at(entry, now))
            .collect()
    }

    pub fn compute_entries(
        &self,
        entries: Vec<LedgerEntry>,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<ComputedLedgerEntry>> {
        self.compute_entries_at(entries, time_provider.now())
    }

    /// the whole ledger, enriched and ordered by serial
    pub fn view_at(&self, entries: Vec<LedgerEntry>, now: DateTime<Utc>) -> Result<Vec<ComputedLedgerEntry>> {
        let mut computed = self.compute_entries_at(entries, now)?;
        sort_by_serial(&mut computed);
        Ok(computed)
    }

    pub fn view(
        &self,
        entries: Vec<LedgerEntry>,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<ComputedLedgerEntry>> {
        self.view_at(entries, time_provider.now())
    }

    /// entries whose serial appears in a search expression like `1,3-5,NS1`,
    /// enriched and ordered by serial
    ///
    /// only matching entries are evaluated, so a bad date elsewhere in the
    /// ledger does not fail the search.
    pub fn search_at(
        &self,
        entries: Vec<LedgerEntry>,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ComputedLedgerEntry>> {
        let tokens = parse_search_expression(query);
        let matched: Vec<LedgerEntry> = entries
            .into_iter()
            .filter(|entry| tokens.iter().any(|token| token.matches(&entry.serial_number)))
            .collect();
        tracing::debug!(query, tokens = tokens.len(), matched = matched.len(), "ledger search");

        self.view_at(matched, now)
    }

    pub fn search(
        &self,
        entries: Vec<LedgerEntry>,
        query: &str,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<ComputedLedgerEntry>> {
        self.search_at(entries, query, time_provider.now())
    }
}

/// running totals shown beneath a list of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(with = "money_number")]
    pub interest_today: Money,
    #[serde(with = "money_number")]
    pub total_payable: Money,
}

impl Totals {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ComputedLedgerEntry>) -> Self {
        entries.into_iter().fold(Totals::default(), |mut acc, entry| {
            acc.interest_today += entry.interest_today;
            acc.total_payable += entry.total_payable;
            acc
        })
    }
}

/// portfolio-wide figures for the analytics view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_entries: usize,
    #[serde(with = "money_number")]
    pub total_payable: Money,
    #[serde(with = "money_number")]
    pub total_interest: Money,
    /// how much the ledger's payable grows per month at current rates
    #[serde(with = "money_number")]
    pub monthly_increase: Money,
}

impl LedgerSummary {
    pub fn from_entries(entries: &[ComputedLedgerEntry]) -> Self {
        let totals = Totals::from_entries(entries);
        let monthly_increase = entries
            .iter()
            .filter(|e| !e.interest_rate.is_zero() && !e.interest_applicable_amount.is_zero())
            .map(|e| e.interest_applicable_amount * e.interest_rate.as_decimal())
            .sum();

        Self {
            total_entries: entries.len(),
            total_payable: totals.total_payable,
            total_interest: totals.interest_today,
            monthly_increase,
        }
    }
}
