//! Cash-flow ledger entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atrium_core::{DomainError, DomainResult, RecordId, TenantId};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }
}

impl core::fmt::Display for EntryType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a ledger entry.
///
/// Cancelled entries stay listable but never contribute to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Confirmed => "confirmed",
            EntryStatus::Pending => "pending",
            EntryStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record contributing to cash-flow totals.
///
/// `tenant_id` is assigned at creation and immutable thereafter. The amount
/// is validated non-negative at construction; direction is carried by
/// `entry_type`, never by sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub transaction_date: NaiveDate,
    pub category: String,
    pub status: EntryStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<RecordId>,
}

impl LedgerEntry {
    /// Create a new entry within a tenant, validating the amount.
    pub fn new(
        tenant_id: TenantId,
        entry_type: EntryType,
        amount: Decimal,
        transaction_date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        if amount.is_sign_negative() {
            return Err(DomainError::validation(
                "amount",
                "amount must be non-negative",
            ));
        }

        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            entry_type,
            amount,
            transaction_date,
            category: category.into(),
            status: EntryStatus::Confirmed,
            description: description.into(),
            payment_method: None,
            customer_id: None,
            invoice_id: None,
            project_id: None,
        })
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Whether this entry contributes to summaries.
    pub fn counts_toward_totals(&self) -> bool {
        self.status != EntryStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn negative_amount_is_a_validation_error() {
        let err = LedgerEntry::new(
            TenantId::new(),
            EntryType::Expense,
            dec("-5.00"),
            date("2026-01-10"),
            "office",
            "paper",
        )
        .unwrap_err();

        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "amount"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_amount_is_accepted() {
        let entry = LedgerEntry::new(
            TenantId::new(),
            EntryType::Income,
            Decimal::ZERO,
            date("2026-01-10"),
            "misc",
            "placeholder",
        )
        .unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
        assert!(entry.counts_toward_totals());
    }

    #[test]
    fn cancelled_entries_do_not_count() {
        let entry = LedgerEntry::new(
            TenantId::new(),
            EntryType::Income,
            dec("10"),
            date("2026-01-10"),
            "sales",
            "",
        )
        .unwrap()
        .with_status(EntryStatus::Cancelled);
        assert!(!entry.counts_toward_totals());
    }
}
