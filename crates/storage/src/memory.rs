//! In-memory storage backend.
//!
//! Used by the API wiring and tests. Concurrency-safe behind `RwLock`s;
//! each request gets read-committed visibility of whatever was inserted
//! before its lock acquisition.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use atrium_auth::{TenantScope, UserAccount};
use atrium_core::{RecordId, UserId};
use atrium_finance::{Invoice, LedgerEntry};

use crate::filter::{GroupKey, RecordFilter};
use crate::store::{InvoiceStore, LedgerStore, StorageError, StorageResult, UserStore};

/// In-memory implementation of all three store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<LedgerEntry>>,
    invoices: RwLock<Vec<Invoice>>,
    users: RwLock<Vec<UserAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl core::fmt::Debug) -> StorageError {
    StorageError::Backend("lock poisoned".to_string())
}

impl LedgerStore for MemoryStore {
    fn find(&self, scope: &TenantScope, filter: &RecordFilter) -> StorageResult<Vec<LedgerEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|e| scope.permits(e.tenant_id) && filter.matches(e))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, scope: &TenantScope, id: RecordId) -> StorageResult<LedgerEntry> {
        let entries = self.entries.read().map_err(poisoned)?;
        entries
            .iter()
            .find(|e| e.id == id && scope.permits(e.tenant_id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn count(&self, scope: &TenantScope, filter: &RecordFilter) -> StorageResult<usize> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|e| scope.permits(e.tenant_id) && filter.matches(e))
            .count())
    }

    fn group_sum(
        &self,
        scope: &TenantScope,
        filter: &RecordFilter,
        key: GroupKey,
    ) -> StorageResult<Vec<(String, Decimal)>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for entry in entries
            .iter()
            .filter(|e| scope.permits(e.tenant_id) && filter.matches(e))
        {
            *sums.entry(key.of(entry)).or_default() += entry.amount;
        }
        Ok(sums.into_iter().collect())
    }

    fn insert(&self, entry: LedgerEntry) -> StorageResult<()> {
        self.entries.write().map_err(poisoned)?.push(entry);
        Ok(())
    }

    fn delete(&self, scope: &TenantScope, id: RecordId) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|e| !(e.id == id && scope.permits(e.tenant_id)));
        if entries.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

impl InvoiceStore for MemoryStore {
    fn find(&self, scope: &TenantScope) -> StorageResult<Vec<Invoice>> {
        let invoices = self.invoices.read().map_err(poisoned)?;
        Ok(invoices
            .iter()
            .filter(|i| scope.permits(i.tenant_id))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, scope: &TenantScope, id: RecordId) -> StorageResult<Invoice> {
        let invoices = self.invoices.read().map_err(poisoned)?;
        invoices
            .iter()
            .find(|i| i.id == id && scope.permits(i.tenant_id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn insert(&self, invoice: Invoice) -> StorageResult<()> {
        self.invoices.write().map_err(poisoned)?.push(invoice);
        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn find(&self, scope: &TenantScope) -> StorageResult<Vec<UserAccount>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users
            .iter()
            .filter(|u| scope.permits(u.tenant_id))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, scope: &TenantScope, id: UserId) -> StorageResult<UserAccount> {
        let users = self.users.read().map_err(poisoned)?;
        users
            .iter()
            .find(|u| u.user_id == id && scope.permits(u.tenant_id))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn insert(&self, user: UserAccount) -> StorageResult<()> {
        self.users.write().map_err(poisoned)?.push(user);
        Ok(())
    }

    fn update(&self, scope: &TenantScope, user: UserAccount) -> StorageResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        let existing = users
            .iter_mut()
            .find(|u| u.user_id == user.user_id && scope.permits(u.tenant_id))
            .ok_or(StorageError::NotFound)?;
        // tenant_id is immutable after creation.
        let tenant_id = existing.tenant_id;
        *existing = UserAccount { tenant_id, ..user };
        Ok(())
    }

    fn delete(&self, scope: &TenantScope, id: UserId) -> StorageResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        let before = users.len();
        users.retain(|u| !(u.user_id == id && scope.permits(u.tenant_id)));
        if users.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
