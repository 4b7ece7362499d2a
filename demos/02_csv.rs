/// csv - import raw rows, compute, export the enriched ledger
use ledger_accrual_rs::formats::{export_csv, import_csv, LedgerView};
use ledger_accrual_rs::{Ledger, SafeTimeProvider, TimeSource};
use chrono::{TimeZone, Utc};

const ROWS: &str = "\
serialNumber,displayDate,weight,amount
NS1,05-01-2024,4g,25000
NS2,05-13-2024,4g,25000
NS3,17-08-2024,6g,31000
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let report = import_csv(ROWS.as_bytes())?;
    for failure in &report.failures {
        println!("skipped line {:?}: {}", failure.line, failure.error);
    }

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    ));
    let computed = Ledger::default().view(report.entries, &time)?;

    println!("\n--- csv ---");
    export_csv(&computed, std::io::stdout())?;

    println!("\n--- summary ---");
    let view = LedgerView::new(computed, time.now());
    println!("{}", serde_json::to_string_pretty(&view.summary)?);

    Ok(())
}
