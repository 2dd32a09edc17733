//! Inclusive calendar date ranges.
//!
//! Allocations, leave periods and approved-leave windows are all expressed
//! as `[from, to]` with both ends counted as days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive `[from, to]` range of calendar days.
///
/// Construction does not enforce `from <= to`; callers that need a
/// well-formed range validate it and report their own error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two end dates.
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Days between `from` and `to`, exclusive of the last day.
    ///
    /// Zero or negative for ranges that do not move forward in time.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Number of calendar days covered, counting both ends.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        self.span_days() + 1
    }

    /// Returns true if `to` is strictly after `from`.
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }

    /// Returns true if the given date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Returns true if `other` shares at least one day with this range.
    #[must_use]
    pub fn overlaps(&self, other: &DateRange) -> bool {
        other.to >= self.from && other.from <= self.to
    }

    /// Window membership used for period aggregation: starts inside the
    /// window, ends inside the window, or strictly spans it.
    #[must_use]
    pub fn touches_window(&self, window: &DateRange) -> bool {
        window.contains(self.from)
            || window.contains(self.to)
            || (self.from < window.from && self.to > window.to)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

#[cfg(test)]
#[path = "date_range_tests.rs"]
mod tests;
