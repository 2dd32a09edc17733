//! Leave period types.

use leave_shared::types::{CompanyId, DateRange, LeavePeriodId};
use serde::{Deserialize, Serialize};

/// A company-wide leave year (or other window) used to aggregate allocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeavePeriod {
    /// Unique identifier.
    pub id: LeavePeriodId,
    /// Company this period belongs to.
    pub company_id: CompanyId,
    /// Period name (e.g., "Leave Year 2024").
    pub name: String,
    /// Dates covered by the period.
    pub range: DateRange,
    /// Whether the period is currently in use.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl LeavePeriod {
    /// Returns true if this period is the aggregation window for `range`:
    /// it starts or ends inside `range`, or strictly spans it.
    #[must_use]
    pub fn applies_to(&self, range: &DateRange) -> bool {
        self.is_active && self.range.touches_window(range)
    }
}
