//! Request DTOs and their validation into domain types.
//!
//! All parsing failures surface as `Validation` errors naming the offending
//! field; handlers never see a half-parsed request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use atrium_core::{DomainError, DomainResult, TenantId};
use atrium_finance::{DateRange, EntryStatus, EntryType, Invoice, LedgerEntry};
use atrium_storage::RecordFilter;

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CashflowQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub entry_type: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

impl CashflowQuery {
    pub fn to_filter(&self) -> DomainResult<RecordFilter> {
        let mut filter = RecordFilter::all().with_date_range(DateRange::new(
            parse_date("from", self.from.as_deref())?,
            parse_date("to", self.to.as_deref())?,
        ));

        if let Some(t) = self.entry_type.as_deref() {
            filter.entry_type = Some(parse_entry_type(t)?);
        }
        if let Some(s) = self.status.as_deref() {
            filter.status = Some(parse_status(s)?);
        }
        filter.category = self.category.clone();
        filter.payment_method = self.payment_method.clone();

        Ok(filter)
    }
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub entry_type: String,
    pub amount: Decimal,
    pub transaction_date: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub payment_method: Option<String>,
}

impl CreateEntryRequest {
    pub fn into_entry(self, tenant_id: TenantId) -> DomainResult<LedgerEntry> {
        let entry_type = parse_entry_type(&self.entry_type)?;
        let date = parse_date("transaction_date", Some(&self.transaction_date))?
            .ok_or_else(|| DomainError::validation("transaction_date", "is required"))?;

        let mut entry = LedgerEntry::new(
            tenant_id,
            entry_type,
            self.amount,
            date,
            self.category,
            self.description,
        )?;
        entry.payment_method = self.payment_method;
        Ok(entry)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub number: String,
    pub amount: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub fee_amount: Decimal,
    pub due_date: String,
    pub customer_id: String,
}

impl CreateInvoiceRequest {
    pub fn into_invoice(self, tenant_id: TenantId) -> DomainResult<Invoice> {
        let due_date = parse_date("due_date", Some(&self.due_date))?
            .ok_or_else(|| DomainError::validation("due_date", "is required"))?;
        let customer_id = self
            .customer_id
            .parse()
            .map_err(|_| DomainError::validation("customer_id", "must be a uuid"))?;

        Invoice::new(
            tenant_id,
            self.number,
            self.amount,
            self.discount_amount,
            self.fee_amount,
            due_date,
            customer_id,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub role: String,
    /// Target tenant. Required for super-admin callers; members always act
    /// in their own tenant and may not name another one.
    pub tenant_id: Option<String>,
}

// -------------------------
// Field parsing
// -------------------------

pub fn parse_date(field: &'static str, value: Option<&str>) -> DomainResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| DomainError::validation(field, "must be an ISO date (YYYY-MM-DD)")),
    }
}

pub fn parse_entry_type(raw: &str) -> DomainResult<EntryType> {
    match raw {
        "income" => Ok(EntryType::Income),
        "expense" => Ok(EntryType::Expense),
        _ => Err(DomainError::validation(
            "entry_type",
            "must be one of: income, expense",
        )),
    }
}

pub fn parse_status(raw: &str) -> DomainResult<EntryStatus> {
    match raw {
        "confirmed" => Ok(EntryStatus::Confirmed),
        "pending" => Ok(EntryStatus::Pending),
        "cancelled" => Ok(EntryStatus::Cancelled),
        _ => Err(DomainError::validation(
            "status",
            "must be one of: confirmed, pending, cancelled",
        )),
    }
}

pub fn parse_role(raw: &str) -> DomainResult<atrium_auth::Role> {
    match raw {
        "super_admin" => Ok(atrium_auth::Role::SuperAdmin),
        "admin" => Ok(atrium_auth::Role::Admin),
        "user" => Ok(atrium_auth::Role::User),
        _ => Err(DomainError::validation(
            "role",
            "must be one of: super_admin, admin, user",
        )),
    }
}
