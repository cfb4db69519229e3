//! Application wiring: the storage collaborator behind trait objects.

use atrium_storage::{InvoiceStore, LedgerStore, MemoryStore, UserStore};

/// Shared per-process services, injected into handlers as an extension.
pub struct AppServices {
    store: MemoryStore,
}

impl AppServices {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
        }
    }

    pub fn ledger(&self) -> &dyn LedgerStore {
        &self.store
    }

    pub fn invoices(&self) -> &dyn InvoiceStore {
        &self.store
    }

    pub fn users(&self) -> &dyn UserStore {
        &self.store
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
