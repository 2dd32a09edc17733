//! Filters for allocation lookups.
//!
//! Each rule check describes the allocations it needs as an
//! [`AllocationQuery`]; store implementations translate it into their own
//! query language. [`AllocationQuery::matches`] is the reference semantics.

use chrono::NaiveDate;
use leave_shared::types::{DateRange, EmployeeId, LeaveAllocationId, LeaveTypeId};

use super::types::{AllocationSummary, DocStatus, LeaveAllocation};

/// Date predicate applied to an allocation's `[from_date, to_date]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// `to_date >= range.from AND from_date <= range.to`
    Overlapping(DateRange),
    /// `from_date` in window, OR `to_date` in window, OR strictly spans the window.
    TouchingWindow(DateRange),
    /// `to_date < date`
    EndingBefore(NaiveDate),
    /// `from_date > date`
    StartingAfter(NaiveDate),
}

impl DateFilter {
    fn matches(&self, range: &DateRange) -> bool {
        match self {
            Self::Overlapping(other) => range.overlaps(other),
            Self::TouchingWindow(window) => range.touches_window(window),
            Self::EndingBefore(date) => range.to < *date,
            Self::StartingAfter(date) => range.from > *date,
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AllocationOrder {
    /// Most recently ending first.
    #[default]
    ToDateDesc,
    /// Earliest starting first.
    FromDateAsc,
}

/// Filter over stored allocations of one employee and leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationQuery {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Leave type.
    pub leave_type_id: LeaveTypeId,
    /// Required document status.
    pub doc_status: DocStatus,
    /// Required carry-forward flag, if any.
    pub carry_forward: Option<bool>,
    /// Date predicate, if any.
    pub dates: Option<DateFilter>,
    /// Record to leave out, typically the one being validated.
    pub exclude: Option<LeaveAllocationId>,
    /// Result ordering.
    pub order: AllocationOrder,
    /// Maximum number of rows.
    pub limit: Option<usize>,
}

impl AllocationQuery {
    /// Submitted allocations of `employee_id` for `leave_type_id`.
    #[must_use]
    pub fn submitted(employee_id: EmployeeId, leave_type_id: LeaveTypeId) -> Self {
        Self {
            employee_id,
            leave_type_id,
            doc_status: DocStatus::Submitted,
            carry_forward: None,
            dates: None,
            exclude: None,
            order: AllocationOrder::default(),
            limit: None,
        }
    }

    /// Restricts to allocations with the given carry-forward flag.
    #[must_use]
    pub fn carry_forward(mut self, carry_forward: bool) -> Self {
        self.carry_forward = Some(carry_forward);
        self
    }

    /// Applies a date predicate.
    #[must_use]
    pub fn dates(mut self, filter: DateFilter) -> Self {
        self.dates = Some(filter);
        self
    }

    /// Leaves out the given record, if any.
    #[must_use]
    pub fn excluding(mut self, id: Option<LeaveAllocationId>) -> Self {
        self.exclude = id;
        self
    }

    /// Sets the result ordering.
    #[must_use]
    pub fn order_by(mut self, order: AllocationOrder) -> Self {
        self.order = order;
        self
    }

    /// Caps the number of rows returned.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns true if `record` satisfies every filter of this query.
    ///
    /// Records without an ID are never matched; only saved records are queryable.
    #[must_use]
    pub fn matches(&self, record: &LeaveAllocation) -> bool {
        let Some(id) = record.id else {
            return false;
        };

        record.employee_id == self.employee_id
            && record.leave_type_id == self.leave_type_id
            && record.doc_status == self.doc_status
            && self.carry_forward.is_none_or(|flag| record.carry_forward == flag)
            && self.dates.is_none_or(|filter| filter.matches(&record.range()))
            && self.exclude != Some(id)
    }

    /// Sorts and truncates already-filtered rows according to this query.
    pub fn finish(&self, rows: &mut Vec<AllocationSummary>) {
        match self.order {
            AllocationOrder::ToDateDesc => rows.sort_by(|a, b| b.to_date.cmp(&a.to_date)),
            AllocationOrder::FromDateAsc => rows.sort_by(|a, b| a.from_date.cmp(&b.from_date)),
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
    }
}
