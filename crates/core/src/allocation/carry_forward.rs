//! Carry-forward sizing from the previous allocation's unused balance.

use chrono::NaiveDate;
use leave_shared::types::EmployeeId;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::AllocationError;
use super::policy::AllocationPolicy;
use super::query::{AllocationOrder, AllocationQuery, DateFilter};
use super::store::LeaveStore;
use crate::hr::LeaveType;

/// Unused balance of the most recent submitted allocation ending before `as_of`.
///
/// With a finite expiry only the latest base (non carry-forward) allocation
/// qualifies; otherwise the lookback also follows carry-forward chains. The
/// policy lookbacks become the query's row limit; only the first row is read.
/// The result is `total - approved leave days` and may be negative. Returns
/// zero when no prior allocation qualifies.
///
/// # Errors
///
/// Returns `CarryForwardNotAllowed` if the leave type does not carry forward,
/// or any store error.
pub fn compute<S: LeaveStore + ?Sized>(
    store: &S,
    policy: &AllocationPolicy,
    employee_id: EmployeeId,
    leave_type: &LeaveType,
    as_of: NaiveDate,
) -> Result<Decimal, AllocationError> {
    if !leave_type.is_carry_forward {
        return Err(AllocationError::CarryForwardNotAllowed {
            leave_type: leave_type.name.clone(),
        });
    }

    let base = AllocationQuery::submitted(employee_id, leave_type.id)
        .dates(DateFilter::EndingBefore(as_of))
        .order_by(AllocationOrder::ToDateDesc);
    let query = match leave_type.carry_forward_expiry_days() {
        Some(_) => base.carry_forward(false).limit(policy.expiring_lookback),
        None => base.limit(policy.chained_lookback),
    };

    let Some(previous) = store.query_allocations(&query)?.into_iter().next() else {
        debug!(
            %employee_id,
            leave_type = %leave_type.name,
            %as_of,
            "No prior allocation to carry forward"
        );
        return Ok(Decimal::ZERO);
    };

    let leaves_taken =
        store.approved_leave_days(employee_id, leave_type.id, previous.range())?;
    let carried = previous.total_leaves_allocated - leaves_taken;
    debug!(
        %employee_id,
        leave_type = %leave_type.name,
        previous = %previous.id,
        previous_total = %previous.total_leaves_allocated,
        %leaves_taken,
        %carried,
        "Carry forward computed"
    );
    Ok(carried)
}
