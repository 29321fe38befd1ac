//! Terminal tables

use parking_desk::application::{ExitForm, OccupancySnapshot};
use parking_desk::domain::{FeeQuote, RateTier};
use parking_desk::shared::{format_display, format_money};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
};

pub fn tiers_table(tiers: &[RateTier], currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record(["No", "ID", "Name", "Rate / hour", "Status"]);

    for (i, tier) in tiers.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            tier.id.to_string(),
            tier.name.clone(),
            format_money(currency, tier.hourly_rate),
            tier.status.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());
    table.to_string()
}

pub fn board_table(snapshot: &OccupancySnapshot, currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "No", "ID", "Plate", "Tier", "Rate", "Entry", "Exit", "Fee", "Action",
    ]);

    for row in &snapshot.rows {
        let record = &row.record;
        builder.push_record([
            row.number.to_string(),
            record.id.to_string(),
            record.plate_number.clone(),
            record.tier_name.clone().unwrap_or_else(|| "-".into()),
            record
                .hourly_rate
                .map(|r| format_money(currency, r))
                .unwrap_or_else(|| "-".into()),
            format_display(record.entry_at),
            record
                .exit_at
                .map(format_display)
                .unwrap_or_else(|| "still parked".into()),
            record
                .total_fee
                .map(|f| format_money(currency, f))
                .unwrap_or_else(|| "-".into()),
            if row.exit_allowed { "exit" } else { "" }.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(4..5), Alignment::right());
    table.modify(Columns::new(7..8), Alignment::right());
    format!(
        "{}\n{} records, {} still parked, {} exited",
        table,
        snapshot.total,
        snapshot.still_parked,
        snapshot.exited()
    )
}

pub fn quote_lines(quote: &FeeQuote, currency: &str) -> String {
    format!(
        "Duration       : {} h {} min\nBillable hours : {}\nRate / hour    : {}\nFee            : {}",
        quote.elapsed_hours,
        quote.elapsed_minutes,
        quote.billable_hours,
        format_money(currency, quote.hourly_rate),
        format_money(currency, quote.fee),
    )
}

pub fn exit_form_lines(form: &ExitForm, currency: &str) -> String {
    let record = form.record();
    let mut out = format!(
        "Record         : {}\nPlate          : {}\nEntry          : {}\nExit           : {}\n",
        record.id,
        record.plate_number,
        format_display(record.entry_at),
        format_display(form.exit_at()),
    );
    match form.quote() {
        Some(quote) => out.push_str(&quote_lines(quote, currency)),
        None => out.push_str("Fee            : exit time is before entry"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use parking_desk::application::BoardRow;
    use parking_desk::domain::{ParkingRecord, RateTierId, RecordId, TierStatus};
    use rust_decimal::Decimal;

    #[test]
    fn tier_table_formats_rates() {
        let tiers = vec![RateTier {
            id: RateTierId::from(1),
            name: "Mobil".into(),
            hourly_rate: Decimal::from(12500),
            status: TierStatus::Active,
        }];
        let out = tiers_table(&tiers, "Rp");
        assert!(out.contains("Mobil"));
        assert!(out.contains("Rp 12.500"));
    }

    #[test]
    fn board_summary_counts_exits() {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        let row = |n: usize, exited: bool| BoardRow {
            number: n,
            exit_allowed: !exited,
            record: ParkingRecord {
                id: RecordId::from(n as i64),
                plate_number: format!("B {} X", n),
                rate_tier_id: None,
                tier_name: None,
                hourly_rate: None,
                entry_at: entry,
                exit_at: exited.then_some(entry),
                total_fee: exited.then(|| Decimal::from(2000)),
            },
        };
        let snapshot = OccupancySnapshot {
            rows: vec![row(1, false), row(2, true), row(3, true)],
            total: 3,
            still_parked: 1,
        };
        let out = board_table(&snapshot, "Rp");
        assert!(out.contains("3 records, 1 still parked, 2 exited"));
        assert!(out.contains("still parked"));
    }

    #[test]
    fn quote_shows_breakdown() {
        let quote = FeeQuote {
            elapsed_hours: 2,
            elapsed_minutes: 1,
            billable_hours: 3,
            hourly_rate: Decimal::from(2000),
            fee: Decimal::from(6000),
        };
        let out = quote_lines(&quote, "Rp");
        assert!(out.contains("2 h 1 min"));
        assert!(out.contains("Rp 6.000"));
    }
}
