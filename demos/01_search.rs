/// search - range expressions, serial ordering and running totals
use ledger_accrual_rs::formats::entries_from_json;
use ledger_accrual_rs::{expand_search_expression, Ledger, SafeTimeProvider, TimeSource, Totals};
use chrono::{Duration, TimeZone, Utc};

const DOCS: &str = r#"[
    {"serialNumber": "B2", "displayDate": "01-01-2025", "date": "2025-01-01", "weight": "3g", "amount": 12000},
    {"serialNumber": "A10", "displayDate": "15-03-2024", "date": "2024-03-15", "weight": "9g", "amount": 45000},
    {"serialNumber": "A2", "displayDate": "20-12-2024", "date": "2024-12-20", "weight": "2g", "amount": 8000},
    {"serialNumber": "1", "displayDate": "02-02-2025", "date": "2025-02-02", "weight": "1g", "amount": 3000}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query = "1,A1-A10,B2";
    println!("{query} expands to {:?}\n", expand_search_expression(query));

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();
    let ledger = Ledger::default();

    for _ in 0..2 {
        println!("as of {}", time.now().format("%Y-%m-%d"));
        let results = ledger.search(entries_from_json(DOCS)?, query, &time)?;
        for entry in &results {
            println!(
                "  {:<4} {:>10} {:>6} {:>10} {:>10}",
                entry.entry.serial_number,
                entry.entry.amount,
                entry.interest_rate,
                entry.interest_today.to_fixed(2),
                entry.total_payable.to_fixed(2),
            );
        }
        let totals = Totals::from_entries(&results);
        println!(
            "  totals: interest {} payable {}\n",
            totals.interest_today.to_fixed(2),
            totals.total_payable.to_fixed(2)
        );

        controller.advance(Duration::days(45));
    }

    Ok(())
}
