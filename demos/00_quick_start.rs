/// quick start - interest on a single entry
use ledger_accrual_rs::{AccrualEngine, LedgerEntryBuilder, SafeTimeProvider, TimeSource};
use chrono::{TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let entry = LedgerEntryBuilder::new()
        .serial_number("A12")
        .display_date("10-05-2024")
        .weight("8g")
        .amount_text("40000")
        .build()?;

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 6, 14, 0, 0, 0).unwrap()
    ));

    let engine = AccrualEngine::default();
    let interest = engine.compute(&entry.date, entry.amount, &time)?;

    println!("serial:          {}", entry.serial_number);
    println!("rate:            {}", interest.rate);
    println!("applicable:      {}", interest.applicable_principal.to_fixed(2));
    println!("interest today:  {}", interest.interest_today.to_fixed(2));
    println!("total payable:   {}", interest.total_payable.to_fixed(2));

    Ok(())
}
