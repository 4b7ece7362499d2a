pub mod config;
pub mod decimal;
pub mod entry;
pub mod errors;
pub mod formats;
pub mod interest;
pub mod ledger;
pub mod serial;
pub mod types;

// re-export key types
pub use config::InterestTerms;
pub use decimal::{Money, Rate};
pub use entry::LedgerEntryBuilder;
pub use errors::{LedgerError, Result};
pub use formats::{ImportReport, LedgerView};
pub use interest::{compute_interest, AccrualEngine, CompoundingRule, InterestBreakdown};
pub use ledger::{Ledger, LedgerSummary, Totals};
pub use serial::{expand_search_expression, sort_by_serial, sorted_by_serial, SearchToken, SerialKey};
pub use types::{ComputedLedgerEntry, LedgerEntry, SerialNumbered};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
