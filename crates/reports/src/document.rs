//! Paginated fixed-width document export.
//!
//! The printable counterpart of the CSV export: fixed-width columns, a
//! repeated column header at the top of every page, and the summary block
//! on the final page. Fonts and colors are a presentation concern of the
//! consumer; this renderer fixes layout only.

use crate::table::{Cell, RenderError, ReportTable, SummaryLine, format_money};

/// Layout options for the document renderer.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub title: String,
    /// Data rows per page. When the row cursor would exceed this, a new
    /// page begins and the column header repeats.
    pub rows_per_page: usize,
}

impl DocumentOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows_per_page: 40,
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page.max(1);
        self
    }
}

const COLUMN_GAP: &str = "  ";
const PAGE_BREAK: char = '\u{0c}';

/// Render a table plus its precomputed summary as a paginated document.
pub fn render_document(
    table: &ReportTable,
    summary: &[SummaryLine],
    options: &DocumentOptions,
) -> Result<Vec<u8>, RenderError> {
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(Cell::render).collect())
        .collect();

    let widths = column_widths(&table.columns, &rendered);
    let header = header_lines(&table.columns, &widths);

    let rows_per_page = options.rows_per_page.max(1);
    let page_count = rendered.len().div_ceil(rows_per_page).max(1);

    let mut out = String::new();
    for page in 0..page_count {
        if page > 0 {
            out.push(PAGE_BREAK);
        }
        out.push_str(&options.title);
        out.push('\n');
        out.push('\n');
        out.push_str(&header);

        let start = page * rows_per_page;
        let end = (start + rows_per_page).min(rendered.len());
        for (cells, row) in rendered[start..end].iter().zip(&table.rows[start..end]) {
            out.push_str(&format_row(cells, row, &widths));
            out.push('\n');
        }

        if page + 1 == page_count {
            out.push('\n');
            out.push_str(&summary_block(summary));
        }

        out.push('\n');
        out.push_str(&format!("Page {} of {}\n", page + 1, page_count));
    }

    Ok(out.into_bytes())
}

fn column_widths(columns: &[String], rendered: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rendered {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    widths
}

fn header_lines(columns: &[String], widths: &[usize]) -> String {
    let names: Vec<String> = columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(name, w)| format!("{name:<w$}"))
        .collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!(
        "{}\n{}\n",
        names.join(COLUMN_GAP),
        rule.join(COLUMN_GAP)
    )
}

fn format_row(cells: &[String], row: &[Cell], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for ((text, cell), w) in cells.iter().zip(row).zip(widths.iter().copied()) {
        if cell.right_aligned() {
            parts.push(format!("{text:>w$}"));
        } else {
            parts.push(format!("{text:<w$}"));
        }
    }
    // Trailing padding on the last column is noise.
    let mut line = parts.join(COLUMN_GAP);
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn summary_block(summary: &[SummaryLine]) -> String {
    let label_width = summary
        .iter()
        .map(|l| l.label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for line in summary {
        let label = format!("{}:", line.label);
        out.push_str(&format!(
            "{label:<label_width$} {}\n",
            format_money(line.amount)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::TenantId;
    use atrium_finance::{EntryType, LedgerEntry, summarize};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::table::{cashflow_summary_lines, ledger_table};

    fn entries(n: usize) -> Vec<LedgerEntry> {
        (0..n)
            .map(|i| {
                LedgerEntry::new(
                    TenantId::new(),
                    EntryType::Income,
                    Decimal::new((i as i64 + 1) * 100, 2),
                    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                    "sales",
                    format!("entry {i}"),
                )
                .unwrap()
            })
            .collect()
    }

    fn render(n: usize, rows_per_page: usize) -> String {
        let rows = entries(n);
        let summary = cashflow_summary_lines(&summarize(&rows));
        let options = DocumentOptions::new("Cash flow").with_rows_per_page(rows_per_page);
        let bytes = render_document(&ledger_table(&rows), &summary, &options).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn header_repeats_on_every_page() {
        let text = render(25, 10);

        assert_eq!(text.matches(PAGE_BREAK).count(), 2);
        assert_eq!(text.matches("Date").count(), 3);
        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("Page 3 of 3"));
    }

    #[test]
    fn summary_appears_only_on_the_last_page() {
        let text = render(25, 10);
        assert_eq!(text.matches("Total income:").count(), 1);

        let last_page = text.rsplit(PAGE_BREAK).next().unwrap();
        assert!(last_page.contains("Total income:"));
        assert!(last_page.contains("Balance:"));
    }

    #[test]
    fn empty_report_is_a_single_page_with_zero_summary() {
        let text = render(0, 10);
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("Balance:       0.00"));
        assert_eq!(text.matches(PAGE_BREAK).count(), 0);
    }

    #[test]
    fn money_column_is_right_aligned() {
        let text = render(2, 10);
        let lines: Vec<&str> = text.lines().collect();
        // Data lines end with the amount; wider amounts are flush right.
        let amount_lines: Vec<&str> = lines
            .iter()
            .filter(|l| l.contains("entry "))
            .copied()
            .collect();
        assert!(amount_lines[0].ends_with("1.00"));
        assert!(amount_lines[1].ends_with("2.00"));
        assert_eq!(amount_lines[0].len(), amount_lines[1].len());
    }
}
