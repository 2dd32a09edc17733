//! Property-based tests for the allocation rule checks.

use chrono::{Duration, NaiveDate};
use leave_shared::types::DateRange;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::AllocationError;
use super::rules::{clamp_carry_forward, validate_forward, validate_granularity};
use super::types::CapCheck;

/// Strategy to generate a date in 2020..2030.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default() + Duration::days(offset)
    })
}

/// Strategy to generate an inclusive range of 1 to 400 days.
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 0i64..400)
        .prop_map(|(from, len)| DateRange::new(from, from + Duration::days(len)))
}

/// Strategy to generate an amount in tenths of a day.
fn tenths_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1000).prop_map(|tenths| Decimal::new(tenths, 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Ranges that do not move forward always fail with `InvalidPeriod`.
    #[test]
    fn prop_backward_period_rejected(to in date_strategy(), back in 0i64..400) {
        let range = DateRange::new(to + Duration::days(back), to);
        let result = validate_forward(range);
        prop_assert!(
            matches!(result, Err(AllocationError::InvalidPeriod { .. })),
            "expected InvalidPeriod, got: {:?}",
            result
        );
    }

    /// Forward ranges always pass.
    #[test]
    fn prop_forward_period_accepted(from in date_strategy(), len in 1i64..1000) {
        let range = DateRange::new(from, from + Duration::days(len));
        prop_assert!(validate_forward(range).is_ok());
    }

    /// Halves pass a 0.5 step; anything with another fractional part fails.
    #[test]
    fn prop_half_day_granularity(value in tenths_strategy()) {
        let step = Decimal::new(5, 1);
        let tenths = (value * Decimal::TEN).trunc();
        let is_half_multiple = (tenths % Decimal::from(5)).is_zero();
        prop_assert_eq!(validate_granularity(value, step).is_ok(), is_half_multiple);
    }

    /// Overlap is symmetric.
    #[test]
    fn prop_overlap_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// For well-formed ranges the window test agrees with plain intersection.
    #[test]
    fn prop_window_matches_overlap(a in range_strategy(), window in range_strategy()) {
        prop_assert_eq!(a.touches_window(&window), a.overlaps(&window));
    }

    /// Clamping never leaves the period total above the cap and never raises the amount.
    #[test]
    fn prop_clamp_respects_cap(
        max_allowed in (1i64..100).prop_map(Decimal::from),
        already_allocated in (0i64..100).prop_map(Decimal::from),
        computed in tenths_strategy(),
    ) {
        let cap = CapCheck::Capped {
            max_allowed,
            already_allocated,
            projected_total: already_allocated + computed,
        };
        let (carried, warning) = clamp_carry_forward(computed, &cap);
        prop_assert!(carried <= computed);
        prop_assert!(already_allocated + carried <= max_allowed);
        prop_assert_eq!(warning.is_some(), already_allocated + computed > max_allowed);
    }

    /// An uncapped check never clamps.
    #[test]
    fn prop_uncapped_never_clamps(computed in tenths_strategy()) {
        prop_assert_eq!(clamp_carry_forward(computed, &CapCheck::Uncapped), (computed, None));
    }
}
