//! Repository seam between allocation rules and persistence.

use leave_shared::types::{
    CompanyId, DateRange, EmployeeId, LeaveAllocationId, LeaveTypeId,
};
use rust_decimal::Decimal;

use super::error::AllocationError;
use super::query::AllocationQuery;
use super::types::{AllocationField, AllocationSummary};
use crate::hr::{EmployeeInfo, LeavePeriod, LeaveType};

/// Read and write access the allocation rules need.
///
/// This trait is implemented by the persistence layer. Implementations
/// report missing references with the matching `*NotFound` variant and any
/// other failure as [`AllocationError::Store`].
pub trait LeaveStore: Send + Sync {
    /// Load a leave type's configuration.
    fn leave_type(&self, id: LeaveTypeId) -> Result<LeaveType, AllocationError>;

    /// Load an employee's name and company.
    fn employee(&self, id: EmployeeId) -> Result<EmployeeInfo, AllocationError>;

    /// Find the company's active leave period applying to `range`.
    fn leave_period(
        &self,
        range: DateRange,
        company_id: CompanyId,
    ) -> Result<Option<LeavePeriod>, AllocationError>;

    /// Approved leave days taken by the employee for the leave type within `range`.
    fn approved_leave_days(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        range: DateRange,
    ) -> Result<Decimal, AllocationError>;

    /// Run an allocation query, honouring its ordering and limit.
    fn query_allocations(
        &self,
        query: &AllocationQuery,
    ) -> Result<Vec<AllocationSummary>, AllocationError>;

    /// Write a single field of a stored allocation, bypassing validation.
    fn persist_field(
        &self,
        id: LeaveAllocationId,
        field: AllocationField,
        value: Decimal,
    ) -> Result<(), AllocationError>;
}
