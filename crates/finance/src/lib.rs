//! `atrium-finance` — ledger entries, invoices, and the financial aggregator.
//!
//! Everything here is a pure function of its inputs. Summaries are views,
//! recomputed from scratch on every query; nothing in this crate caches or
//! persists a total. All arithmetic is exact `Decimal`; no binary floating
//! point touches a user-facing figure.

pub mod entry;
pub mod invoice;
pub mod range;
pub mod summary;

pub use entry::{EntryStatus, EntryType, LedgerEntry};
pub use invoice::{Invoice, InvoiceStatus, InvoiceSummary, summarize_invoices};
pub use range::DateRange;
pub use summary::{GroupedSummary, Summary, grouped_from_rows, summarize, summarize_by};
