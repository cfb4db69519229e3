//! `atrium-reports` — export renderers.
//!
//! Renderers are pure projections of `(rows, summary)`: they never requery
//! storage and never recompute aggregates, so an export always shows
//! exactly the totals the aggregator produced for it.

pub mod csv_export;
pub mod document;
pub mod table;

pub use csv_export::render_csv;
pub use document::{DocumentOptions, render_document};
pub use table::{
    Cell, RenderError, ReportTable, SummaryLine, cashflow_summary_lines, format_money,
    invoice_summary_lines, invoice_table, ledger_table,
};
