//! `atrium-storage` — the storage collaborator contract and an in-memory
//! implementation.
//!
//! Every query combines a [`atrium_auth::TenantScope`] with additional
//! filters via logical AND; there is no unscoped read or write path.

pub mod filter;
pub mod memory;
pub mod store;

pub use filter::{GroupKey, RecordFilter};
pub use memory::MemoryStore;
pub use store::{InvoiceStore, LedgerStore, StorageError, StorageResult, UserStore};
