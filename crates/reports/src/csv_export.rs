//! CSV export.
//!
//! One header row, one row per record, a blank separator row, then the
//! summary rows. Quoting and quote-doubling are delegated to the csv
//! writer; descriptions are free-form user input and an unescaped
//! delimiter would silently corrupt every subsequent column.

use crate::table::{Cell, RenderError, ReportTable, SummaryLine, format_money};

/// Render a table plus its precomputed summary lines as CSV bytes.
pub fn render_csv(table: &ReportTable, summary: &[SummaryLine]) -> Result<Vec<u8>, RenderError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&table.columns)?;

    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::render))?;
    }

    // Blank separator row between data and summary.
    writer.write_record([""])?;
    for line in summary {
        writer.write_record([line.label.as_str(), &format_money(line.amount)])?;
    }

    writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::TenantId;
    use atrium_finance::{EntryType, LedgerEntry, summarize};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::table::{cashflow_summary_lines, ledger_table};

    fn entry(amount: i64, description: &str) -> LedgerEntry {
        LedgerEntry::new(
            TenantId::new(),
            EntryType::Income,
            Decimal::new(amount, 2),
            NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            "sales",
            description,
        )
        .unwrap()
    }

    #[test]
    fn csv_round_trips_rows_and_hostile_text() {
        let entries = vec![
            entry(100_00, "plain"),
            entry(25_50, "comma, inside"),
            entry(9_99, "he said \"quoted\""),
            entry(1_00, "line\nbreak"),
        ];
        let summary = cashflow_summary_lines(&summarize(&entries));
        let bytes = render_csv(&ledger_table(&entries), &summary).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        // 4 data rows, 1 blank separator, 3 summary rows.
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].get(3), Some("plain"));
        assert_eq!(rows[1].get(3), Some("comma, inside"));
        assert_eq!(rows[2].get(3), Some("he said \"quoted\""));
        assert_eq!(rows[3].get(3), Some("line\nbreak"));

        assert_eq!(rows[5].get(0), Some("Total income"));
        assert_eq!(rows[5].get(1), Some("136.49"));
        assert_eq!(rows[6].get(1), Some("0.00"));
        assert_eq!(rows[7].get(0), Some("Balance"));
        assert_eq!(rows[7].get(1), Some("136.49"));
    }

    #[test]
    fn empty_export_still_carries_header_and_zero_summary() {
        let entries: Vec<LedgerEntry> = Vec::new();
        let summary = cashflow_summary_lines(&summarize(&entries));
        let bytes = render_csv(&ledger_table(&entries), &summary).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Date,"));
        assert!(text.contains("Total income,0.00"));
        assert!(text.contains("Balance,0.00"));
    }

    #[test]
    fn amounts_render_with_two_fraction_digits() {
        let entries = vec![entry(5, "tiny")];
        let summary = cashflow_summary_lines(&summarize(&entries));
        let bytes = render_csv(&ledger_table(&entries), &summary).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(",0.05"));
    }
}
