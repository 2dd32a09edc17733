//! In-memory `LeaveStore` backed by concurrent maps.

use chrono::NaiveDate;
use dashmap::DashMap;
use leave_shared::types::{
    CompanyId, DateRange, EmployeeId, LeaveAllocationId, LeavePeriodId, LeaveTypeId,
};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::AllocationError;
use super::query::AllocationQuery;
use super::store::LeaveStore;
use super::types::{AllocationField, AllocationSummary, DocStatus, LeaveAllocation};
use crate::hr::{EmployeeInfo, LeavePeriod, LeaveType};

/// A `LeaveStore` holding everything in process memory.
///
/// Approved leave is recorded per calendar day so that partial overlaps
/// with an allocation range are counted exactly.
#[derive(Debug, Default)]
pub struct InMemoryLeaveStore {
    leave_types: DashMap<LeaveTypeId, LeaveType>,
    employees: DashMap<EmployeeId, EmployeeInfo>,
    periods: DashMap<LeavePeriodId, LeavePeriod>,
    allocations: DashMap<LeaveAllocationId, LeaveAllocation>,
    approved_days: DashMap<(EmployeeId, LeaveTypeId), Vec<(NaiveDate, Decimal)>>,
}

impl InMemoryLeaveStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a leave type.
    pub fn insert_leave_type(&self, leave_type: LeaveType) -> LeaveTypeId {
        let id = leave_type.id;
        self.leave_types.insert(id, leave_type);
        id
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: EmployeeInfo) -> EmployeeId {
        let id = employee.id;
        self.employees.insert(id, employee);
        id
    }

    /// Adds or replaces a leave period.
    pub fn insert_period(&self, period: LeavePeriod) -> LeavePeriodId {
        let id = period.id;
        self.periods.insert(id, period);
        id
    }

    /// Saves an allocation, assigning an ID if it has none.
    pub fn insert_allocation(&self, mut allocation: LeaveAllocation) -> LeaveAllocationId {
        let id = *allocation.id.get_or_insert_with(LeaveAllocationId::new);
        self.allocations.insert(id, allocation);
        id
    }

    /// Marks a saved allocation as submitted.
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::AllocationNotFound` if the ID is unknown.
    pub fn submit(&self, id: LeaveAllocationId) -> Result<(), AllocationError> {
        let mut record = self
            .allocations
            .get_mut(&id)
            .ok_or(AllocationError::AllocationNotFound(id))?;
        record.doc_status = DocStatus::Submitted;
        Ok(())
    }

    /// Returns a copy of a saved allocation.
    #[must_use]
    pub fn allocation(&self, id: LeaveAllocationId) -> Option<LeaveAllocation> {
        self.allocations.get(&id).map(|record| record.value().clone())
    }

    /// Records `per_day` approved leave on every day of `range`.
    pub fn record_approved_leave(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        range: DateRange,
        per_day: Decimal,
    ) {
        let mut days = self.approved_days.entry((employee_id, leave_type_id)).or_default();
        days.extend(
            range
                .from
                .iter_days()
                .take_while(|date| *date <= range.to)
                .map(|date| (date, per_day)),
        );
    }

    /// Records one full approved leave day on every day of `range`.
    pub fn approve_leave(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        range: DateRange,
    ) {
        self.record_approved_leave(employee_id, leave_type_id, range, Decimal::ONE);
    }
}

impl LeaveStore for InMemoryLeaveStore {
    fn leave_type(&self, id: LeaveTypeId) -> Result<LeaveType, AllocationError> {
        self.leave_types
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AllocationError::LeaveTypeNotFound(id))
    }

    fn employee(&self, id: EmployeeId) -> Result<EmployeeInfo, AllocationError> {
        self.employees
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AllocationError::EmployeeNotFound(id))
    }

    fn leave_period(
        &self,
        range: DateRange,
        company_id: CompanyId,
    ) -> Result<Option<LeavePeriod>, AllocationError> {
        let period = self
            .periods
            .iter()
            .filter(|entry| entry.company_id == company_id && entry.applies_to(&range))
            .map(|entry| entry.value().clone())
            .min_by_key(|period| period.range.from);
        Ok(period)
    }

    fn approved_leave_days(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        range: DateRange,
    ) -> Result<Decimal, AllocationError> {
        let total = self
            .approved_days
            .get(&(employee_id, leave_type_id))
            .map(|days| {
                days.iter()
                    .filter(|(date, _)| range.contains(*date))
                    .map(|(_, amount)| *amount)
                    .sum::<Decimal>()
            })
            .unwrap_or(Decimal::ZERO);
        Ok(total)
    }

    fn query_allocations(
        &self,
        query: &AllocationQuery,
    ) -> Result<Vec<AllocationSummary>, AllocationError> {
        let mut rows: Vec<AllocationSummary> = self
            .allocations
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .filter_map(|entry| entry.summary())
            .collect();
        query.finish(&mut rows);
        Ok(rows)
    }

    fn persist_field(
        &self,
        id: LeaveAllocationId,
        field: AllocationField,
        value: Decimal,
    ) -> Result<(), AllocationError> {
        let mut record = self
            .allocations
            .get_mut(&id)
            .ok_or(AllocationError::AllocationNotFound(id))?;
        match field {
            AllocationField::TotalLeavesAllocated => record.total_leaves_allocated = value,
        }
        debug!(allocation_id = %id, field = field.as_str(), %value, "Allocation field persisted");
        Ok(())
    }
}
