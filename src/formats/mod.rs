pub mod csv;
pub mod json;

pub use self::csv::{export_csv, export_csv_string, import_csv, ImportFailure, ImportReport, EXPORT_HEADERS};
pub use self::json::{entries_from_json, entry_from_json, LedgerView};
