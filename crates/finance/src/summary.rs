//! The financial aggregator.
//!
//! Summaries are recomputed from scratch on every call. There is no cache
//! and no incremental running total, so there is nothing to invalidate;
//! correctness comes from recomputation over the tenant-filtered input.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atrium_core::{DomainError, DomainResult};

use crate::entry::{EntryType, LedgerEntry};

/// Income/expense/balance over a set of ledger entries.
///
/// A computed view, never stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Summary {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    fn add(&mut self, entry_type: EntryType, amount: Decimal) {
        match entry_type {
            EntryType::Income => self.income += amount,
            EntryType::Expense => self.expense += amount,
        }
        self.balance = self.income - self.expense;
    }
}

/// One [`Summary`] per group key. Groups are unordered; rendering callers
/// sort as they see fit.
pub type GroupedSummary = HashMap<String, Summary>;

/// Sum a collection of ledger entries into a [`Summary`].
///
/// Cancelled entries are skipped. An empty input yields all zeros, not an
/// error.
pub fn summarize<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Summary {
    let mut summary = Summary::default();
    for entry in entries {
        if entry.counts_toward_totals() {
            summary.add(entry.entry_type, entry.amount);
        }
    }
    summary
}

/// Sum ledger entries partitioned by an arbitrary grouping key.
pub fn summarize_by<'a, F>(
    entries: impl IntoIterator<Item = &'a LedgerEntry>,
    key: F,
) -> GroupedSummary
where
    F: Fn(&LedgerEntry) -> String,
{
    let mut groups: GroupedSummary = HashMap::new();
    for entry in entries {
        if entry.counts_toward_totals() {
            groups
                .entry(key(entry))
                .or_default()
                .add(entry.entry_type, entry.amount);
        }
    }
    groups
}

/// Assemble a [`GroupedSummary`] from pre-summed storage rows
/// (`group_sum` output), one row set per direction.
///
/// Fails with [`DomainError::Aggregation`] on a duplicated group key:
/// a malformed storage result must never surface as a partial total.
pub fn grouped_from_rows(
    income_rows: Vec<(String, Decimal)>,
    expense_rows: Vec<(String, Decimal)>,
) -> DomainResult<GroupedSummary> {
    let mut groups: GroupedSummary = HashMap::new();

    let mut seen_income: Vec<&str> = Vec::new();
    for (key, sum) in &income_rows {
        if seen_income.contains(&key.as_str()) {
            return Err(DomainError::aggregation(format!(
                "duplicate income group '{key}'"
            )));
        }
        seen_income.push(key);
        groups.entry(key.clone()).or_default().income = *sum;
    }

    let mut seen_expense: Vec<&str> = Vec::new();
    for (key, sum) in &expense_rows {
        if seen_expense.contains(&key.as_str()) {
            return Err(DomainError::aggregation(format!(
                "duplicate expense group '{key}'"
            )));
        }
        seen_expense.push(key);
        groups.entry(key.clone()).or_default().expense = *sum;
    }

    for summary in groups.values_mut() {
        summary.balance = summary.income - summary.expense;
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryStatus;
    use atrium_core::TenantId;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn entry(entry_type: EntryType, amount: &str) -> LedgerEntry {
        LedgerEntry::new(
            TenantId::new(),
            entry_type,
            dec(amount),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "general",
            "",
        )
        .unwrap()
    }

    #[test]
    fn worked_example_from_the_dashboard() {
        let entries = vec![
            entry(EntryType::Income, "1000"),
            entry(EntryType::Expense, "300"),
            entry(EntryType::Income, "250"),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.income, dec("1250"));
        assert_eq!(summary.expense, dec("300"));
        assert_eq!(summary.balance, dec("950"));
    }

    #[test]
    fn empty_input_yields_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn cancelled_entries_are_excluded() {
        let mut cancelled = entry(EntryType::Income, "500");
        cancelled.status = EntryStatus::Cancelled;
        let entries = vec![entry(EntryType::Income, "100"), cancelled];

        assert_eq!(summarize(&entries).income, dec("100"));
    }

    #[test]
    fn grouping_partitions_by_key() {
        let mut rent = entry(EntryType::Expense, "800");
        rent.category = "rent".to_string();
        let mut sales_a = entry(EntryType::Income, "120.50");
        sales_a.category = "sales".to_string();
        let mut sales_b = entry(EntryType::Income, "79.50");
        sales_b.category = "sales".to_string();

        let groups = summarize_by(&[rent, sales_a, sales_b], |e| e.category.clone());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["sales"].income, dec("200.00"));
        assert_eq!(groups["rent"].expense, dec("800"));
        assert_eq!(groups["rent"].balance, dec("-800"));
    }

    #[test]
    fn duplicate_group_rows_are_an_aggregation_error() {
        let income = vec![
            ("sales".to_string(), dec("10")),
            ("sales".to_string(), dec("20")),
        ];
        let err = grouped_from_rows(income, Vec::new()).unwrap_err();
        assert!(matches!(err, DomainError::Aggregation(_)));
    }

    #[test]
    fn grouped_rows_combine_directions() {
        let income = vec![("consulting".to_string(), dec("1500.25"))];
        let expense = vec![
            ("consulting".to_string(), dec("200")),
            ("rent".to_string(), dec("800")),
        ];

        let groups = grouped_from_rows(income, expense).unwrap();
        assert_eq!(groups["consulting"].balance, dec("1300.25"));
        assert_eq!(groups["rent"].balance, dec("-800"));
    }

    proptest! {
        /// balance == sum(income) - sum(expense), exactly, for any mix of
        /// cent-denominated entries.
        #[test]
        fn balance_identity(amounts in proptest::collection::vec((any::<bool>(), 0u64..10_000_000), 0..200)) {
            let mut entries = Vec::new();
            let mut income = Decimal::ZERO;
            let mut expense = Decimal::ZERO;

            for (is_income, cents) in amounts {
                let amount = Decimal::new(cents as i64, 2);
                let entry_type = if is_income { EntryType::Income } else { EntryType::Expense };
                if is_income { income += amount } else { expense += amount }
                entries.push(entry(entry_type, &amount.to_string()));
            }

            let summary = summarize(&entries);
            prop_assert_eq!(summary.income, income);
            prop_assert_eq!(summary.expense, expense);
            prop_assert_eq!(summary.balance, income - expense);
        }
    }
}
