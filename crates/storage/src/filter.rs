//! Ledger query filters, combined with the tenant scope via logical AND.

use serde::{Deserialize, Serialize};

use atrium_finance::{DateRange, EntryStatus, EntryType, LedgerEntry};

/// Additional predicates a caller may apply on top of the tenant scope.
///
/// All populated fields must match (logical AND). An empty filter matches
/// everything the scope admits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Drop cancelled entries. Set by aggregation paths so storage-side
    /// sums match what the aggregator would count; list paths leave it
    /// unset because cancelled entries stay listable.
    #[serde(default)]
    pub exclude_cancelled: bool,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn without_cancelled(mut self) -> Self {
        self.exclude_cancelled = true;
        self
    }

    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if self.exclude_cancelled && !entry.counts_toward_totals() {
            return false;
        }
        if !self.date_range.contains(entry.transaction_date) {
            return false;
        }
        if let Some(t) = self.entry_type {
            if entry.entry_type != t {
                return false;
            }
        }
        if let Some(s) = self.status {
            if entry.status != s {
                return false;
            }
        }
        if let Some(c) = &self.category {
            if &entry.category != c {
                return false;
            }
        }
        if let Some(m) = &self.payment_method {
            if entry.payment_method.as_deref() != Some(m.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Grouping key for `group_sum` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Category,
    PaymentMethod,
}

impl GroupKey {
    /// Extract the group key from an entry. Entries without a payment
    /// method fall into an explicit "unspecified" bucket rather than being
    /// dropped from the result.
    pub fn of(&self, entry: &LedgerEntry) -> String {
        match self {
            GroupKey::Category => entry.category.clone(),
            GroupKey::PaymentMethod => entry
                .payment_method
                .clone()
                .unwrap_or_else(|| "unspecified".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::TenantId;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn entry(date: &str, category: &str) -> LedgerEntry {
        LedgerEntry::new(
            TenantId::new(),
            EntryType::Income,
            Decimal::new(100, 0),
            date.parse::<NaiveDate>().unwrap(),
            category,
            "",
        )
        .unwrap()
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let e = entry("2026-03-10", "sales");

        let filter = RecordFilter::all()
            .with_date_range(DateRange::new(
                Some("2026-03-01".parse().unwrap()),
                Some("2026-03-31".parse().unwrap()),
            ))
            .with_category("sales");
        assert!(filter.matches(&e));

        let wrong_category = filter.clone().with_category("rent");
        assert!(!wrong_category.matches(&e));

        let wrong_type = filter.with_entry_type(EntryType::Expense);
        assert!(!wrong_type.matches(&e));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(RecordFilter::all().matches(&entry("1999-01-01", "x")));
    }

    #[test]
    fn missing_payment_method_groups_as_unspecified() {
        let plain = entry("2026-03-10", "sales");
        assert_eq!(GroupKey::PaymentMethod.of(&plain), "unspecified");
        assert_eq!(GroupKey::Category.of(&plain), "sales");

        let card = plain.with_payment_method("card");
        assert_eq!(GroupKey::PaymentMethod.of(&card), "card");
    }
}
