//! Storage collaborator traits.
//!
//! Implementations must treat the [`TenantScope`] as non-optional: every
//! method takes the scope alongside any additional filter, and a lookup by
//! id alone does not exist. Absent and out-of-scope records are both
//! reported as `NotFound`, so callers cannot probe for cross-tenant
//! existence.

use rust_decimal::Decimal;
use thiserror::Error;

use atrium_auth::{TenantScope, UserAccount};
use atrium_core::{DomainError, RecordId, UserId};
use atrium_finance::{Invoice, LedgerEntry};

use crate::filter::{GroupKey, RecordFilter};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Record absent or outside the caller's scope (indistinguishable).
    #[error("not found")]
    NotFound,

    /// Backend failure (connection, corruption, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => DomainError::NotFound,
            StorageError::Backend(msg) => DomainError::Aggregation(msg),
        }
    }
}

/// Ledger entry storage.
pub trait LedgerStore: Send + Sync {
    fn find(&self, scope: &TenantScope, filter: &RecordFilter) -> StorageResult<Vec<LedgerEntry>>;

    fn find_by_id(&self, scope: &TenantScope, id: RecordId) -> StorageResult<LedgerEntry>;

    fn count(&self, scope: &TenantScope, filter: &RecordFilter) -> StorageResult<usize>;

    /// Per-group sums of `amount` over the scoped, filtered entries.
    fn group_sum(
        &self,
        scope: &TenantScope,
        filter: &RecordFilter,
        key: GroupKey,
    ) -> StorageResult<Vec<(String, Decimal)>>;

    fn insert(&self, entry: LedgerEntry) -> StorageResult<()>;

    fn delete(&self, scope: &TenantScope, id: RecordId) -> StorageResult<()>;
}

/// Invoice storage.
pub trait InvoiceStore: Send + Sync {
    fn find(&self, scope: &TenantScope) -> StorageResult<Vec<Invoice>>;

    fn find_by_id(&self, scope: &TenantScope, id: RecordId) -> StorageResult<Invoice>;

    fn insert(&self, invoice: Invoice) -> StorageResult<()>;
}

/// User account storage.
pub trait UserStore: Send + Sync {
    fn find(&self, scope: &TenantScope) -> StorageResult<Vec<UserAccount>>;

    fn find_by_id(&self, scope: &TenantScope, id: UserId) -> StorageResult<UserAccount>;

    fn insert(&self, user: UserAccount) -> StorageResult<()>;

    fn update(&self, scope: &TenantScope, user: UserAccount) -> StorageResult<()>;

    fn delete(&self, scope: &TenantScope, id: UserId) -> StorageResult<()>;
}
