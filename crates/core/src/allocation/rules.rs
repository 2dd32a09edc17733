//! Individual allocation rule checks.
//!
//! Every function here is pure: the validator gathers the inputs from the
//! store and calls these in sequence, stopping at the first failure.

use leave_shared::types::DateRange;
use rust_decimal::Decimal;

use super::error::AllocationError;
use super::types::{AllocationWarning, CapCheck};
use crate::hr::LeaveType;

/// Checks that the range moves forward in time.
///
/// # Errors
///
/// Returns `InvalidPeriod` if `to <= from`.
pub fn validate_forward(range: DateRange) -> Result<(), AllocationError> {
    if !range.is_forward() {
        return Err(AllocationError::InvalidPeriod {
            from_date: range.from,
            to_date: range.to,
        });
    }
    Ok(())
}

/// Checks that a carry-forward allocation fits the leave type's expiry window.
///
/// `expiry_days` is the leave type's finite expiry, if any; it only applies
/// when `carry_forward` is set.
///
/// # Errors
///
/// Returns `CarryForwardExpiry` if the span exceeds the expiry window.
pub fn validate_expiry(
    range: DateRange,
    carry_forward: bool,
    expiry_days: Option<u32>,
) -> Result<(), AllocationError> {
    let span_days = range.span_days();
    match expiry_days {
        Some(expiry_days) if carry_forward && span_days > i64::from(expiry_days) => {
            Err(AllocationError::CarryForwardExpiry {
                span_days,
                expiry_days,
            })
        }
        _ => Ok(()),
    }
}

/// Rejects leave-without-pay types.
///
/// # Errors
///
/// Returns `LwpNotAllocatable` if the type is flagged leave without pay.
pub fn validate_not_lwp(leave_type: &LeaveType) -> Result<(), AllocationError> {
    if leave_type.is_lwp {
        return Err(AllocationError::LwpNotAllocatable {
            leave_type: leave_type.name.clone(),
        });
    }
    Ok(())
}

/// Checks that `value` is a whole multiple of `step`. A non-positive step disables the check.
///
/// # Errors
///
/// Returns `Granularity` if there is a remainder.
pub fn validate_granularity(value: Decimal, step: Decimal) -> Result<(), AllocationError> {
    if step <= Decimal::ZERO {
        return Ok(());
    }
    if !(value % step).is_zero() {
        return Err(AllocationError::Granularity { value, step });
    }
    Ok(())
}

/// Requires a positive total unless the leave type accrues from zero.
///
/// # Errors
///
/// Returns `MandatoryAllocation` for a zero or negative total on a type
/// that is neither earned nor compensatory leave.
pub fn require_allocation(total: Decimal, leave_type: &LeaveType) -> Result<(), AllocationError> {
    if total <= Decimal::ZERO && !leave_type.allows_zero_allocation() {
        return Err(AllocationError::MandatoryAllocation {
            leave_type: leave_type.name.clone(),
        });
    }
    Ok(())
}

/// An allocation cannot grant more days than the calendar days it covers.
///
/// # Errors
///
/// Returns `ExceedsPeriodLength` if `total` is greater than the inclusive day count.
pub fn validate_period_length(range: DateRange, total: Decimal) -> Result<(), AllocationError> {
    let period_days = range.len_days();
    if total > Decimal::from(period_days) {
        return Err(AllocationError::ExceedsPeriodLength {
            total_leaves_allocated: total,
            period_days,
        });
    }
    Ok(())
}

/// Compares the allocation with leave already approved in its range.
///
/// Over-use is a hard failure unless the leave type allows a negative
/// balance, in which case a warning is returned instead.
///
/// # Errors
///
/// Returns `LessAllocation` if `leaves_taken > total` and negatives are not allowed.
pub fn validate_against_usage(
    total: Decimal,
    leaves_taken: Decimal,
    leave_type: &LeaveType,
) -> Result<Option<AllocationWarning>, AllocationError> {
    if leaves_taken <= total {
        return Ok(None);
    }
    if leave_type.allow_negative {
        return Ok(Some(AllocationWarning::ApprovedExceedsAllocation {
            total_leaves_allocated: total,
            leaves_taken,
        }));
    }
    Err(AllocationError::LessAllocation {
        total_leaves_allocated: total,
        leaves_taken,
    })
}

/// Reduces a computed carry-forward so the period total stays within the cap.
///
/// `cap` must have been evaluated with `computed` as the candidate. When it
/// is exceeded the result is `max_allowed - already_allocated`; otherwise
/// `computed` is returned untouched.
#[must_use]
pub fn clamp_carry_forward(
    computed: Decimal,
    cap: &CapCheck,
) -> (Decimal, Option<AllocationWarning>) {
    match *cap {
        CapCheck::Capped {
            max_allowed,
            already_allocated,
            projected_total,
        } if projected_total > max_allowed => {
            let carried = max_allowed - already_allocated;
            (
                carried,
                Some(AllocationWarning::CarryForwardClamped {
                    computed,
                    carried,
                    max_allowed,
                }),
            )
        }
        _ => (computed, None),
    }
}
