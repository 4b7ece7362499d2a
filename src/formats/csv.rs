//! csv export of computed entries and import of raw entries.
//!
//! export header:
//! Serial Number,Display Date,ISO Date,Weight,Amount,Interest Rate,Applicable Amount,Interest Today,Total Payable
//!
//! import header: serialNumber,displayDate,weight,amount (display date as DD-MM-YYYY)

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Deserialize;

use crate::entry::LedgerEntryBuilder;
use crate::errors::{LedgerError, Result};
use crate::types::{ComputedLedgerEntry, LedgerEntry};

pub const EXPORT_HEADERS: [&str; 9] = [
    "Serial Number",
    "Display Date",
    "ISO Date",
    "Weight",
    "Amount",
    "Interest Rate",
    "Applicable Amount",
    "Interest Today",
    "Total Payable",
];

/// write computed entries, one row each, in the order given
pub fn export_csv<W: Write>(entries: &[ComputedLedgerEntry], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;

    for computed in entries {
        let entry = &computed.entry;
        wtr.write_record([
            entry.serial_number.clone(),
            entry.display_date.clone(),
            entry.date.clone(),
            entry.weight.clone(),
            entry.amount.as_decimal().normalize().to_string(),
            computed.interest_rate.as_percentage().to_string(),
            computed.interest_applicable_amount.to_fixed(2),
            computed.interest_today.to_fixed(2),
            computed.total_payable.to_fixed(2),
        ])?;
    }

    wtr.flush()?;
    tracing::debug!(rows = entries.len(), "exported ledger csv");
    Ok(())
}

pub fn export_csv_string(entries: &[ComputedLedgerEntry]) -> Result<String> {
    let mut buf = Vec::new();
    export_csv(entries, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LedgerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportRow {
    serial_number: String,
    display_date: String,
    weight: String,
    amount: String,
}

/// a row the import could not turn into an entry
#[derive(Debug)]
pub struct ImportFailure {
    /// 1-based line in the source, when known
    pub line: Option<u64>,
    pub serial_number: Option<String>,
    pub error: LedgerError,
}

/// outcome of an import: the good rows and why the rest were skipped
#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries: Vec<LedgerEntry>,
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn skip(&mut self, line: Option<u64>, serial_number: Option<String>, error: LedgerError) {
        tracing::warn!(?line, ?serial_number, %error, "skipping ledger csv row");
        self.failures.push(ImportFailure {
            line,
            serial_number,
            error,
        });
    }
}

/// read raw entries, validating each row like a newly added entry
///
/// a malformed row is logged and recorded in the report; only an unreadable
/// header fails the whole import.
pub fn import_csv<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut report = ImportReport::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line());
                report.skip(line, None, err.into());
                continue;
            }
        };
        let line = record.position().map(|p| p.line());

        match row_to_entry(&record, &headers) {
            Ok(entry) => report.entries.push(entry),
            Err(err) => {
                let serial = record_serial(&record, &headers);
                report.skip(line, serial, err);
            }
        }
    }

    tracing::debug!(
        imported = report.entries.len(),
        skipped = report.failures.len(),
        "imported ledger csv"
    );
    Ok(report)
}

fn row_to_entry(record: &StringRecord, headers: &StringRecord) -> Result<LedgerEntry> {
    let row: ImportRow = record.deserialize(Some(headers))?;
    LedgerEntryBuilder::new()
        .serial_number(row.serial_number)
        .display_date(row.display_date)
        .weight(row.weight)
        .amount_text(row.amount)
        .build()
}

fn record_serial(record: &StringRecord, headers: &StringRecord) -> Option<String> {
    let idx = headers.iter().position(|h| h == "serialNumber")?;
    record.get(idx).filter(|s| !s.is_empty()).map(str::to_string)
}
