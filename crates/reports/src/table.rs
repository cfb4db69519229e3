//! Report table model shared by both renderers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use atrium_finance::{Invoice, InvoiceSummary, LedgerEntry, Summary};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("csv write failed: {0}")]
    Csv(String),
}

impl From<csv::Error> for RenderError {
    fn from(err: csv::Error) -> Self {
        RenderError::Csv(err.to_string())
    }
}

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Money(Decimal),
    Date(NaiveDate),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Render to the string the exports carry. Money cells always carry
    /// exactly two fractional digits.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Money(d) => format_money(*d),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Empty => String::new(),
        }
    }

    /// Money is right-aligned in fixed-width output.
    pub fn right_aligned(&self) -> bool {
        matches!(self, Cell::Money(_))
    }
}

/// Render a monetary value with exactly two fractional digits.
///
/// Half-cent values round away from zero, the conventional display rule
/// for financial documents.
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    )
}

/// One labeled amount in the summary block of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub amount: Decimal,
}

impl SummaryLine {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Summary block of a cash-flow export.
pub fn cashflow_summary_lines(summary: &Summary) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new("Total income", summary.income),
        SummaryLine::new("Total expense", summary.expense),
        SummaryLine::new("Balance", summary.balance),
    ]
}

/// Summary block of an invoice export.
pub fn invoice_summary_lines(summary: &InvoiceSummary) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new("Total invoiced", summary.invoiced),
        SummaryLine::new("Total received", summary.received),
        SummaryLine::new("Outstanding", summary.outstanding),
    ]
}

/// Column names plus data rows, ready for either renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}

/// Standard cash-flow export table.
pub fn ledger_table<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> ReportTable {
    let mut table = ReportTable::new([
        "Date",
        "Type",
        "Category",
        "Description",
        "Payment method",
        "Status",
        "Amount",
    ]);
    for entry in entries {
        table.push_row(vec![
            Cell::Date(entry.transaction_date),
            Cell::text(entry.entry_type.as_str()),
            Cell::text(&entry.category),
            Cell::text(&entry.description),
            entry
                .payment_method
                .as_deref()
                .map(Cell::text)
                .unwrap_or(Cell::Empty),
            Cell::text(entry.status.as_str()),
            Cell::Money(entry.amount),
        ]);
    }
    table
}

/// Standard invoice export table. The rendered total is the effective
/// amount (discount and fee applied), matching what aggregation counts.
pub fn invoice_table<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> ReportTable {
    let mut table = ReportTable::new([
        "Number",
        "Due date",
        "Status",
        "Amount",
        "Discount",
        "Fee",
        "Total",
        "Paid",
        "Outstanding",
    ]);
    for invoice in invoices {
        table.push_row(vec![
            Cell::text(&invoice.number),
            Cell::Date(invoice.due_date),
            Cell::text(invoice.status.as_str()),
            Cell::Money(invoice.amount),
            Cell::Money(invoice.discount_amount),
            Cell::Money(invoice.fee_amount),
            Cell::Money(invoice.effective_total()),
            Cell::Money(invoice.paid_amount),
            Cell::Money(invoice.outstanding()),
        ]);
    }
    table
}
