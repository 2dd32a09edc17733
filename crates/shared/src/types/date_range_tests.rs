use super::*;
use rstest::rstest;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn jan(from: u32, to: u32) -> DateRange {
    DateRange::new(d(2024, 1, from), d(2024, 1, to))
}

#[test]
fn test_span_and_len() {
    let range = jan(1, 10);
    assert_eq!(range.span_days(), 9);
    assert_eq!(range.len_days(), 10);
}

#[test]
fn test_backwards_range_has_negative_span() {
    let range = DateRange::new(d(2024, 1, 10), d(2024, 1, 1));
    assert_eq!(range.span_days(), -9);
    assert!(!range.is_forward());
}

#[test]
fn test_single_day_is_not_forward() {
    assert!(!jan(5, 5).is_forward());
    assert_eq!(jan(5, 5).len_days(), 1);
}

#[test]
fn test_contains_is_inclusive() {
    let range = jan(1, 10);
    assert!(range.contains(d(2024, 1, 1)));
    assert!(range.contains(d(2024, 1, 10)));
    assert!(!range.contains(d(2024, 1, 11)));
}

#[rstest]
#[case(jan(1, 10), jan(5, 15), true)]
#[case(jan(1, 10), jan(11, 20), false)]
#[case(jan(1, 10), jan(10, 20), true)]
#[case(jan(5, 6), jan(1, 31), true)]
fn test_overlaps_is_symmetric(#[case] a: DateRange, #[case] b: DateRange, #[case] expected: bool) {
    assert_eq!(a.overlaps(&b), expected);
    assert_eq!(b.overlaps(&a), expected);
}

#[rstest]
#[case(jan(1, 10), jan(5, 20), true)]
#[case(jan(15, 25), jan(5, 20), true)]
#[case(jan(1, 31), jan(5, 20), true)]
#[case(jan(21, 31), jan(5, 20), false)]
fn test_touches_window(
    #[case] range: DateRange,
    #[case] window: DateRange,
    #[case] expected: bool,
) {
    assert_eq!(range.touches_window(&window), expected);
}

#[test]
fn test_display() {
    assert_eq!(jan(1, 10).to_string(), "2024-01-01 to 2024-01-10");
}
