//! Leave allocation data types.

use chrono::NaiveDate;
use leave_shared::types::{DateRange, EmployeeId, LeaveAllocationId, LeaveTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Document lifecycle status of an allocation record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Being edited; invisible to other allocations' checks.
    #[default]
    Draft,
    /// Submitted; counts toward overlap, cap, and carry-forward queries.
    Submitted,
    /// Cancelled; ignored everywhere.
    Cancelled,
}

impl DocStatus {
    /// Numeric status as stored by the document framework (0, 1, 2).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::Cancelled => 2,
        }
    }
}

/// A grant of leave days to one employee for one leave type over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveAllocation {
    /// Record ID. `None` until the record is first saved.
    #[serde(default)]
    pub id: Option<LeaveAllocationId>,
    /// Employee receiving the allocation.
    pub employee_id: EmployeeId,
    /// Employee name, filled in during validation.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Leave type being allocated.
    pub leave_type_id: LeaveTypeId,
    /// First day of the allocation.
    pub from_date: NaiveDate,
    /// Last day of the allocation (inclusive).
    pub to_date: NaiveDate,
    /// Allocation is sized from the previous allocation's unused balance.
    #[serde(default)]
    pub carry_forward: bool,
    /// Days entered by the user.
    #[serde(default)]
    pub new_leaves_allocated: Decimal,
    /// Days carried over, computed when `carry_forward` is set.
    #[serde(default)]
    pub carry_forwarded_leaves: Decimal,
    /// Effective allocation, derived from one of the two amounts above.
    #[serde(default)]
    pub total_leaves_allocated: Decimal,
    /// Document status.
    #[serde(default)]
    pub doc_status: DocStatus,
}

impl LeaveAllocation {
    /// Creates an unsaved draft allocation of `new_leaves_allocated` days.
    #[must_use]
    pub fn draft(
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        from_date: NaiveDate,
        to_date: NaiveDate,
        new_leaves_allocated: Decimal,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            employee_name: None,
            leave_type_id,
            from_date,
            to_date,
            carry_forward: false,
            new_leaves_allocated,
            carry_forwarded_leaves: Decimal::ZERO,
            total_leaves_allocated: Decimal::ZERO,
            doc_status: DocStatus::Draft,
        }
    }

    /// Creates an unsaved draft whose size comes from carry-forward.
    #[must_use]
    pub fn carry_forward_draft(
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Self {
        Self {
            carry_forward: true,
            ..Self::draft(employee_id, leave_type_id, from_date, to_date, Decimal::ZERO)
        }
    }

    /// The allocation's date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange::new(self.from_date, self.to_date)
    }

    /// Returns true if the record has been submitted.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.doc_status == DocStatus::Submitted
    }

    /// Query projection of this record; `None` while unsaved.
    #[must_use]
    pub fn summary(&self) -> Option<AllocationSummary> {
        self.id.map(|id| AllocationSummary {
            id,
            from_date: self.from_date,
            to_date: self.to_date,
            total_leaves_allocated: self.total_leaves_allocated,
            carry_forward: self.carry_forward,
        })
    }
}

/// Query projection of a stored allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Record ID.
    pub id: LeaveAllocationId,
    /// First day of the allocation.
    pub from_date: NaiveDate,
    /// Last day of the allocation.
    pub to_date: NaiveDate,
    /// Effective allocation.
    pub total_leaves_allocated: Decimal,
    /// Whether the record was a carry-forward allocation.
    pub carry_forward: bool,
}

impl AllocationSummary {
    /// The summarized allocation's date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange::new(self.from_date, self.to_date)
    }
}

/// Fields the post-submission path may write directly.
///
/// Only the recomputed total is ever written outside a normal save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationField {
    /// `total_leaves_allocated`
    TotalLeavesAllocated,
}

impl AllocationField {
    /// Column name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TotalLeavesAllocated => "total_leaves_allocated",
        }
    }
}

/// Outcome of comparing a candidate amount with the leave type's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapCheck {
    /// The leave type has no cap; nothing was aggregated.
    Uncapped,
    /// The leave type is capped.
    Capped {
        /// Cap configured on the leave type.
        max_allowed: Decimal,
        /// Sum of other submitted allocations in the leave period.
        already_allocated: Decimal,
        /// `already_allocated` plus the candidate amount.
        projected_total: Decimal,
    },
}

impl CapCheck {
    /// Returns true if the projected total is over the cap.
    #[must_use]
    pub fn exceeds(&self) -> bool {
        match self {
            Self::Uncapped => false,
            Self::Capped {
                max_allowed,
                projected_total,
                ..
            } => projected_total > max_allowed,
        }
    }

    /// Room left under the cap before the candidate is added.
    #[must_use]
    pub fn headroom(&self) -> Option<Decimal> {
        match self {
            Self::Uncapped => None,
            Self::Capped {
                max_allowed,
                already_allocated,
                ..
            } => Some(*max_allowed - *already_allocated),
        }
    }
}

/// Advisory messages produced by an otherwise successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// Carry-forward was reduced to stay within the leave type's cap.
    CarryForwardClamped {
        /// Unused balance found on the previous allocation.
        computed: Decimal,
        /// Amount actually carried forward.
        carried: Decimal,
        /// Cap configured on the leave type.
        max_allowed: Decimal,
    },
    /// Approved leave exceeds the allocation; accepted because the leave type
    /// allows negative balances.
    ApprovedExceedsAllocation {
        /// Allocation after the edit.
        total_leaves_allocated: Decimal,
        /// Approved leave days already taken in the allocation's range.
        leaves_taken: Decimal,
    },
}

impl std::fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CarryForwardClamped {
                computed,
                carried,
                max_allowed,
            } => write!(
                f,
                "Carry forwarded leaves reduced from {computed} to {carried} to respect the maximum of {max_allowed}"
            ),
            Self::ApprovedExceedsAllocation {
                total_leaves_allocated,
                leaves_taken,
            } => write!(
                f,
                "Note: Total allocated leaves {total_leaves_allocated} shouldn't be less than already approved leaves {leaves_taken} for the period"
            ),
        }
    }
}

/// Result of a successful `validate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Effective allocation written to the record.
    pub total_leaves_allocated: Decimal,
    /// Carry-forward amount written to the record (zero if not carry-forward).
    pub carry_forwarded_leaves: Decimal,
    /// Cap check against the leave period.
    pub cap: CapCheck,
    /// Advisory messages.
    pub warnings: Vec<AllocationWarning>,
}

/// Result of a successful post-submission reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Recomputed allocation, persisted to the record.
    pub total_leaves_allocated: Decimal,
    /// Approved leave days already taken in the allocation's range.
    pub leaves_taken: Decimal,
    /// Advisory messages.
    pub warnings: Vec<AllocationWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_doc_status_codes() {
        assert_eq!(DocStatus::Draft.code(), 0);
        assert_eq!(DocStatus::Submitted.code(), 1);
        assert_eq!(DocStatus::Cancelled.code(), 2);
    }

    #[test]
    fn test_cap_check_exceeds() {
        let over = CapCheck::Capped {
            max_allowed: dec!(10),
            already_allocated: dec!(8),
            projected_total: dec!(13),
        };
        assert!(over.exceeds());
        assert_eq!(over.headroom(), Some(dec!(2)));

        let at_cap = CapCheck::Capped {
            max_allowed: dec!(10),
            already_allocated: dec!(8),
            projected_total: dec!(10),
        };
        assert!(!at_cap.exceeds());
    }

    #[test]
    fn test_uncapped_never_exceeds() {
        assert!(!CapCheck::Uncapped.exceeds());
        assert_eq!(CapCheck::Uncapped.headroom(), None);
    }

    #[test]
    fn test_warning_display() {
        let warning = AllocationWarning::ApprovedExceedsAllocation {
            total_leaves_allocated: dec!(4),
            leaves_taken: dec!(6),
        };
        assert_eq!(
            warning.to_string(),
            "Note: Total allocated leaves 4 shouldn't be less than already approved leaves 6 for the period"
        );
    }
}
