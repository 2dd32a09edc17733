//! Allocation validator: the entry points run around an allocation's save.
//!
//! [`AllocationValidator::validate`] runs before every save and
//! [`AllocationValidator::reconcile_after_submit`] runs when a submitted
//! allocation is edited. Both are fail-fast: the allocation is only updated
//! once every check has passed.

use chrono::NaiveDate;
use leave_shared::types::{DateRange, EmployeeId, LeaveAllocationId, LeaveTypeId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::AllocationError;
use super::policy::AllocationPolicy;
use super::query::{AllocationOrder, AllocationQuery, DateFilter};
use super::store::LeaveStore;
use super::types::{
    AllocationField, AllocationWarning, CapCheck, LeaveAllocation, ReconcileReport,
    ValidationReport,
};
use super::{cap, carry_forward, rules};
use crate::hr::{EmployeeInfo, LeaveType};

/// Amounts derived from an allocation's inputs.
struct Totals {
    carry_forwarded_leaves: Decimal,
    total_leaves_allocated: Decimal,
    warnings: Vec<AllocationWarning>,
}

/// Validates leave allocations against a [`LeaveStore`].
///
/// One validator may be shared across requests; it holds no per-allocation
/// state.
///
/// The overlap and cap checks read the store without taking locks, so two
/// allocations validated concurrently can both pass and then both be
/// submitted. Closing that window is the caller's job: submit under
/// serializable isolation or back the overlap rule with a unique constraint.
pub struct AllocationValidator<'a, S: ?Sized> {
    store: &'a S,
    policy: AllocationPolicy,
}

impl<'a, S: LeaveStore + ?Sized> AllocationValidator<'a, S> {
    /// Creates a validator with the default policy.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self::with_policy(store, AllocationPolicy::default())
    }

    /// Creates a validator with an explicit policy.
    #[must_use]
    pub fn with_policy(store: &'a S, policy: AllocationPolicy) -> Self {
        Self { store, policy }
    }

    /// The policy in use.
    #[must_use]
    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Validate an allocation before it is saved.
    ///
    /// Checks run in this order, stopping at the first failure:
    /// 1. Period is forward and fits the carry-forward expiry window
    /// 2. Leave type is not leave without pay
    /// 3. Total is computed (carry-forward clamped to the cap) and is non-zero
    ///    unless the type accrues from zero
    /// 4. No overlapping submitted allocation of the same kind
    /// 5. No later carry-forward allocation already consumed this balance
    /// 6. Total fits in the calendar days of the range
    /// 7. User-entered amount is a multiple of the policy step
    /// 8. Period total stays within the leave type's cap
    ///
    /// On success `employee_name`, `carry_forwarded_leaves` and
    /// `total_leaves_allocated` are written to the allocation.
    ///
    /// # Errors
    ///
    /// Returns the `AllocationError` of the first failing check.
    pub fn validate(
        &self,
        allocation: &mut LeaveAllocation,
    ) -> Result<ValidationReport, AllocationError> {
        let range = allocation.range();
        rules::validate_forward(range)?;

        let leave_type = self.store.leave_type(allocation.leave_type_id)?;
        rules::validate_expiry(
            range,
            allocation.carry_forward,
            leave_type.carry_forward_expiry_days(),
        )?;
        rules::validate_not_lwp(&leave_type)?;

        let employee = self.store.employee(allocation.employee_id)?;
        let totals = self.compute_totals(allocation, &leave_type, &employee)?;

        self.check_overlap(allocation, &leave_type)?;
        self.check_back_dated(allocation)?;
        rules::validate_period_length(range, totals.total_leaves_allocated)?;
        rules::validate_granularity(allocation.new_leaves_allocated, self.policy.step)?;

        let candidate = if allocation.carry_forward {
            totals.carry_forwarded_leaves
        } else {
            allocation.new_leaves_allocated
        };
        let cap = cap::evaluate(
            self.store,
            &leave_type,
            &employee,
            range,
            candidate,
            allocation.id,
        )?;
        if let CapCheck::Capped {
            max_allowed,
            projected_total,
            ..
        } = cap
        {
            if projected_total > max_allowed {
                return Err(AllocationError::OverAllocationCap {
                    employee_id: employee.id,
                    leave_type: leave_type.name,
                    max_allowed,
                    projected_total,
                });
            }
        }

        allocation.employee_name = Some(employee.name);
        allocation.carry_forwarded_leaves = totals.carry_forwarded_leaves;
        allocation.total_leaves_allocated = totals.total_leaves_allocated;

        info!(
            employee_id = %allocation.employee_id,
            leave_type = %leave_type.name,
            from_date = %allocation.from_date,
            to_date = %allocation.to_date,
            total = %totals.total_leaves_allocated,
            "Leave allocation validated"
        );

        Ok(ValidationReport {
            total_leaves_allocated: totals.total_leaves_allocated,
            carry_forwarded_leaves: totals.carry_forwarded_leaves,
            cap,
            warnings: totals.warnings,
        })
    }

    /// Recompute and persist the total of an edited, submitted allocation.
    ///
    /// Only `total_leaves_allocated` is written back to the store. Approved
    /// usage is checked before that write, so a failing edit leaves the
    /// stored record untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotSubmitted` for unsaved or unsubmitted records,
    /// `Granularity` or `MandatoryAllocation` for bad amounts, and
    /// `LessAllocation` if approved leave exceeds the new total on a type
    /// that does not allow negative balances.
    pub fn reconcile_after_submit(
        &self,
        allocation: &mut LeaveAllocation,
    ) -> Result<ReconcileReport, AllocationError> {
        let id = allocation
            .id
            .filter(|_| allocation.is_submitted())
            .ok_or(AllocationError::NotSubmitted)?;
        let leave_type = self.store.leave_type(allocation.leave_type_id)?;
        let employee = self.store.employee(allocation.employee_id)?;

        rules::validate_granularity(allocation.new_leaves_allocated, self.policy.step)?;
        let mut totals = self.compute_totals(allocation, &leave_type, &employee)?;

        let leaves_taken = self.store.approved_leave_days(
            allocation.employee_id,
            allocation.leave_type_id,
            allocation.range(),
        )?;
        let usage = rules::validate_against_usage(
            totals.total_leaves_allocated,
            leaves_taken,
            &leave_type,
        )?;

        self.store.persist_field(
            id,
            AllocationField::TotalLeavesAllocated,
            totals.total_leaves_allocated,
        )?;
        allocation.carry_forwarded_leaves = totals.carry_forwarded_leaves;
        allocation.total_leaves_allocated = totals.total_leaves_allocated;

        if let Some(warning) = usage {
            warn!(allocation_id = %id, %leaves_taken, "{warning}");
            totals.warnings.push(warning);
        }
        info!(
            allocation_id = %id,
            total = %totals.total_leaves_allocated,
            %leaves_taken,
            "Leave allocation reconciled"
        );

        Ok(ReconcileReport {
            total_leaves_allocated: totals.total_leaves_allocated,
            leaves_taken,
            warnings: totals.warnings,
        })
    }

    /// Preview the carry-forward an allocation starting on `as_of` would receive.
    ///
    /// The amount is not clamped to the leave type's cap.
    ///
    /// # Errors
    ///
    /// Returns `LeaveTypeNotFound`, `CarryForwardNotAllowed` or a store error.
    pub fn compute_carry_forward(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        as_of: NaiveDate,
    ) -> Result<Decimal, AllocationError> {
        let leave_type = self.store.leave_type(leave_type_id)?;
        carry_forward::compute(self.store, &self.policy, employee_id, &leave_type, as_of)
    }

    /// Compare a candidate amount with the leave type's per-period cap.
    ///
    /// # Errors
    ///
    /// Returns `LeaveTypeNotFound`, `EmployeeNotFound` or a store error.
    pub fn cap_check(
        &self,
        employee_id: EmployeeId,
        leave_type_id: LeaveTypeId,
        range: DateRange,
        candidate: Decimal,
        exclude: Option<LeaveAllocationId>,
    ) -> Result<CapCheck, AllocationError> {
        let leave_type = self.store.leave_type(leave_type_id)?;
        let employee = self.store.employee(employee_id)?;
        cap::evaluate(self.store, &leave_type, &employee, range, candidate, exclude)
    }

    fn compute_totals(
        &self,
        allocation: &LeaveAllocation,
        leave_type: &LeaveType,
        employee: &EmployeeInfo,
    ) -> Result<Totals, AllocationError> {
        let mut warnings = Vec::new();
        let (carry_forwarded_leaves, total_leaves_allocated) = if allocation.carry_forward {
            let computed = carry_forward::compute(
                self.store,
                &self.policy,
                employee.id,
                leave_type,
                allocation.from_date,
            )?;
            let cap = cap::evaluate(
                self.store,
                leave_type,
                employee,
                allocation.range(),
                computed,
                allocation.id,
            )?;
            let (carried, clamped) = rules::clamp_carry_forward(computed, &cap);
            if let Some(warning) = clamped {
                warn!(employee_id = %employee.id, leave_type = %leave_type.name, "{warning}");
                warnings.push(warning);
            }
            (carried, carried)
        } else {
            (Decimal::ZERO, allocation.new_leaves_allocated)
        };

        rules::require_allocation(total_leaves_allocated, leave_type)?;

        Ok(Totals {
            carry_forwarded_leaves,
            total_leaves_allocated,
            warnings,
        })
    }

    fn check_overlap(
        &self,
        allocation: &LeaveAllocation,
        leave_type: &LeaveType,
    ) -> Result<(), AllocationError> {
        let query = AllocationQuery::submitted(allocation.employee_id, allocation.leave_type_id)
            .carry_forward(allocation.carry_forward)
            .dates(DateFilter::Overlapping(allocation.range()))
            .excluding(allocation.id)
            .limit(1);

        if let Some(existing) = self.store.query_allocations(&query)?.into_iter().next() {
            debug!(existing = %existing.id, "Overlapping allocation found");
            return Err(AllocationError::Overlap {
                existing: existing.id,
                employee_id: allocation.employee_id,
                leave_type: leave_type.name.clone(),
                from_date: allocation.from_date,
                to_date: allocation.to_date,
            });
        }
        Ok(())
    }

    fn check_back_dated(&self, allocation: &LeaveAllocation) -> Result<(), AllocationError> {
        let query = AllocationQuery::submitted(allocation.employee_id, allocation.leave_type_id)
            .carry_forward(true)
            .dates(DateFilter::StartingAfter(allocation.to_date))
            .excluding(allocation.id)
            .order_by(AllocationOrder::FromDateAsc)
            .limit(1);

        if let Some(future) = self.store.query_allocations(&query)?.into_iter().next() {
            return Err(AllocationError::BackDatedAllocation {
                future: future.id,
                future_from_date: future.from_date,
            });
        }
        Ok(())
    }
}
