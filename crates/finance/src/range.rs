//! Date-range filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An optionally-bounded date range, inclusive on both ends.
///
/// An absent bound means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::new(Some(date("2026-01-01")), Some(date("2026-01-31")));
        assert!(range.contains(date("2026-01-01")));
        assert!(range.contains(date("2026-01-31")));
        assert!(!range.contains(date("2025-12-31")));
        assert!(!range.contains(date("2026-02-01")));
    }

    #[test]
    fn missing_bound_means_unbounded() {
        let open_start = DateRange::new(None, Some(date("2026-01-31")));
        assert!(open_start.contains(date("1900-01-01")));
        assert!(!open_start.contains(date("2026-02-01")));

        assert!(DateRange::unbounded().contains(date("2099-12-31")));
    }
}
