//! Invoices and invoice-level aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atrium_core::{DomainError, DomainResult, RecordId, TenantId};

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Open,
    Paid,
    Overdue,
    PartiallyPaid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Open => "open",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invoice within a tenant.
///
/// The effective total is derived at read time, never persisted, so the
/// stored amount, discount, and fee can never drift apart from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    pub tenant_id: TenantId,
    pub number: String,
    pub amount: Decimal,
    pub discount_amount: Decimal,
    pub fee_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub customer_id: RecordId,
}

impl Invoice {
    /// Create an invoice, validating that all monetary fields are
    /// non-negative.
    pub fn new(
        tenant_id: TenantId,
        number: impl Into<String>,
        amount: Decimal,
        discount_amount: Decimal,
        fee_amount: Decimal,
        due_date: NaiveDate,
        customer_id: RecordId,
    ) -> DomainResult<Self> {
        for (field, value) in [
            ("amount", amount),
            ("discount_amount", discount_amount),
            ("fee_amount", fee_amount),
        ] {
            if value.is_sign_negative() {
                return Err(DomainError::validation(field, "must be non-negative"));
            }
        }

        Ok(Self {
            id: RecordId::new(),
            tenant_id,
            number: number.into(),
            amount,
            discount_amount,
            fee_amount,
            paid_amount: Decimal::ZERO,
            status: InvoiceStatus::Open,
            due_date,
            payment_date: None,
            customer_id,
        })
    }

    /// The amount an invoice actually counts for:
    /// `amount - discount + fee`. This, not the raw amount, feeds revenue
    /// aggregation.
    pub fn effective_total(&self) -> Decimal {
        self.amount - self.discount_amount + self.fee_amount
    }

    /// What remains to be paid against the effective total.
    pub fn outstanding(&self) -> Decimal {
        self.effective_total() - self.paid_amount
    }

    /// Whether this invoice contributes to revenue summaries.
    pub fn counts_toward_totals(&self) -> bool {
        self.status != InvoiceStatus::Cancelled
    }
}

/// Totals over a set of invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Sum of effective totals (cancelled invoices excluded).
    pub invoiced: Decimal,
    /// Sum of recorded payments.
    pub received: Decimal,
    /// `invoiced - received`.
    pub outstanding: Decimal,
}

/// Aggregate invoices into an [`InvoiceSummary`]. Empty input yields zeros.
pub fn summarize_invoices<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> InvoiceSummary {
    let mut summary = InvoiceSummary::default();
    for invoice in invoices {
        if !invoice.counts_toward_totals() {
            continue;
        }
        summary.invoiced += invoice.effective_total();
        summary.received += invoice.paid_amount;
    }
    summary.outstanding = summary.invoiced - summary.received;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn invoice(amount: &str, discount: &str, fee: &str) -> Invoice {
        Invoice::new(
            TenantId::new(),
            "INV-1",
            dec(amount),
            dec(discount),
            dec(fee),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            RecordId::new(),
        )
        .unwrap()
    }

    #[test]
    fn effective_total_adjusts_for_discount_and_fee() {
        assert_eq!(invoice("100", "10", "5").effective_total(), dec("95"));
    }

    #[test]
    fn negative_discount_is_rejected() {
        let err = Invoice::new(
            TenantId::new(),
            "INV-2",
            dec("100"),
            dec("-1"),
            Decimal::ZERO,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            RecordId::new(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, "discount_amount"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn summary_uses_effective_totals_and_skips_cancelled() {
        let mut paid = invoice("100", "10", "5");
        paid.paid_amount = dec("95");
        paid.status = InvoiceStatus::Paid;

        let open = invoice("200", "0", "0");

        let mut cancelled = invoice("999", "0", "0");
        cancelled.status = InvoiceStatus::Cancelled;

        let summary = summarize_invoices([&paid, &open, &cancelled]);
        assert_eq!(summary.invoiced, dec("295"));
        assert_eq!(summary.received, dec("95"));
        assert_eq!(summary.outstanding, dec("200"));
    }

    #[test]
    fn empty_invoice_set_yields_zeros() {
        assert_eq!(summarize_invoices([]), InvoiceSummary::default());
    }
}
