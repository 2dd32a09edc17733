//! Per-period cap enforcement.

use leave_shared::types::{DateRange, LeaveAllocationId};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::AllocationError;
use super::query::{AllocationQuery, DateFilter};
use super::store::LeaveStore;
use super::types::CapCheck;
use crate::hr::{EmployeeInfo, LeaveType};

/// Compares `candidate` plus the employee's submitted allocations in the
/// enclosing leave period with the leave type's cap.
///
/// Without a resolvable leave period nothing is aggregated and only the
/// candidate counts. `exclude` keeps the record being validated out of the sum.
///
/// # Errors
///
/// Returns any store error.
pub fn evaluate<S: LeaveStore + ?Sized>(
    store: &S,
    leave_type: &LeaveType,
    employee: &EmployeeInfo,
    range: DateRange,
    candidate: Decimal,
    exclude: Option<LeaveAllocationId>,
) -> Result<CapCheck, AllocationError> {
    let period = store.leave_period(range, employee.company_id)?;

    let Some(max_allowed) = leave_type.max_leaves() else {
        return Ok(CapCheck::Uncapped);
    };

    let already_allocated = match &period {
        Some(period) => {
            let query = AllocationQuery::submitted(employee.id, leave_type.id)
                .dates(DateFilter::TouchingWindow(period.range))
                .excluding(exclude);
            store
                .query_allocations(&query)?
                .iter()
                .map(|row| row.total_leaves_allocated)
                .sum::<Decimal>()
        }
        None => Decimal::ZERO,
    };
    let projected_total = already_allocated + candidate;

    debug!(
        employee_id = %employee.id,
        leave_type = %leave_type.name,
        period = period.as_ref().map(|p| p.name.as_str()),
        %max_allowed,
        %already_allocated,
        %projected_total,
        "Cap evaluated"
    );

    Ok(CapCheck::Capped {
        max_allowed,
        already_allocated,
        projected_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::fixtures::{Fixture, d, make_capped, make_leave_type, range};
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_cap_is_uncapped() {
        let fx = Fixture::new();
        let casual = fx.leave_type(LeaveType {
            max_leaves_allowed: Some(dec!(0)),
            ..make_leave_type("Casual")
        });
        fx.period(d(2024, 1, 1), d(2024, 12, 31));
        fx.submitted(casual.id, d(2024, 1, 1), d(2024, 6, 30), dec!(50), false);

        let check = evaluate(
            &fx.store,
            &casual,
            &fx.employee,
            range(d(2024, 7, 1), d(2024, 12, 31)),
            dec!(50),
            None,
        )
        .unwrap();
        assert_eq!(check, CapCheck::Uncapped);
    }

    #[test]
    fn test_sums_allocations_in_period() {
        let fx = Fixture::new();
        let casual = fx.leave_type(make_capped("Casual", dec!(10)));
        fx.period(d(2024, 1, 1), d(2024, 12, 31));
        fx.submitted(casual.id, d(2024, 1, 1), d(2024, 6, 30), dec!(8), false);
        fx.submitted(casual.id, d(2023, 1, 1), d(2023, 6, 30), dec!(9), false);

        let check = evaluate(
            &fx.store,
            &casual,
            &fx.employee,
            range(d(2024, 7, 1), d(2024, 12, 31)),
            dec!(5),
            None,
        )
        .unwrap();
        assert_eq!(
            check,
            CapCheck::Capped {
                max_allowed: dec!(10),
                already_allocated: dec!(8),
                projected_total: dec!(13),
            }
        );
        assert!(check.exceeds());
    }

    #[test]
    fn test_no_period_counts_candidate_only() {
        let fx = Fixture::new();
        let casual = fx.leave_type(make_capped("Casual", dec!(10)));
        fx.submitted(casual.id, d(2024, 1, 1), d(2024, 6, 30), dec!(8), false);

        let check = evaluate(
            &fx.store,
            &casual,
            &fx.employee,
            range(d(2024, 7, 1), d(2024, 12, 31)),
            dec!(5),
            None,
        )
        .unwrap();
        assert_eq!(check.headroom(), Some(dec!(10)));
        assert!(!check.exceeds());
    }

    #[test]
    fn test_excluded_record_not_counted() {
        let fx = Fixture::new();
        let casual = fx.leave_type(make_capped("Casual", dec!(10)));
        fx.period(d(2024, 1, 1), d(2024, 12, 31));
        let own = fx.submitted(casual.id, d(2024, 1, 1), d(2024, 6, 30), dec!(8), false);

        let check = evaluate(
            &fx.store,
            &casual,
            &fx.employee,
            range(d(2024, 1, 1), d(2024, 6, 30)),
            dec!(8),
            Some(own),
        )
        .unwrap();
        assert!(!check.exceeds());
    }

    #[test]
    fn test_inactive_period_ignored() {
        let fx = Fixture::new();
        let casual = fx.leave_type(make_capped("Casual", dec!(10)));
        let mut period = fx.period(d(2024, 1, 1), d(2024, 12, 31));
        period.is_active = false;
        fx.store.insert_period(period);
        fx.submitted(casual.id, d(2024, 1, 1), d(2024, 6, 30), dec!(8), false);

        let check = evaluate(
            &fx.store,
            &casual,
            &fx.employee,
            range(d(2024, 7, 1), d(2024, 12, 31)),
            dec!(5),
            None,
        )
        .unwrap();
        assert_eq!(check.headroom(), Some(dec!(10)));
    }
}
