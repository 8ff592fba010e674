use chrono::{DateTime, Duration, FixedOffset, Utc};
use countup_core::{calendar_month_count, compute, DurationBreakdown};

const REFERENCE: &str = "2024-06-27T19:03:00+03:00";

fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

fn reference() -> DateTime<FixedOffset> {
    at(REFERENCE)
}

fn assert_reconstructs(breakdown: &DurationBreakdown) {
    assert_eq!(breakdown.total_days * 24 + breakdown.hours, breakdown.total_hours);
    assert_eq!(
        breakdown.total_hours * 60 + breakdown.minutes,
        breakdown.total_minutes
    );
    assert_eq!(
        breakdown.total_minutes * 60 + breakdown.seconds,
        breakdown.total_seconds
    );
}

#[test]
fn one_month_and_one_second_after_reference() {
    let breakdown = compute(&at("2024-07-27T19:03:01+03:00"), &reference());

    assert_eq!(
        breakdown,
        DurationBreakdown {
            total_seconds: 2_592_001,
            total_minutes: 43_200,
            total_hours: 720,
            total_days: 30,
            years: 0,
            days_after_years: 30,
            hours: 0,
            minutes: 0,
            seconds: 1,
            total_months: 1,
            weeks: 0,
            days_left: 0,
        }
    );
}

#[test]
fn average_year_and_calendar_months_are_computed_independently() {
    let breakdown = compute(&at("2026-06-27T19:03:01+03:00"), &reference());

    assert_eq!(breakdown.total_days, 730);
    // 730 days is just short of two 365.25-day years...
    assert_eq!(breakdown.years, 1);
    assert_eq!(breakdown.days_after_years, 365);
    // ...while the calendar already shows 24 whole months.
    assert_eq!(breakdown.total_months, 24);
}

#[test]
fn day_of_month_borrow_and_week_split() {
    let breakdown = compute(&at("2024-08-26T23:00:00+03:00"), &reference());

    assert_eq!(breakdown.total_months, 1);
    // Anchor date 2024-07-27 -> 2024-08-26 is 30 calendar days.
    assert_eq!(breakdown.weeks, 4);
    assert_eq!(breakdown.days_left, 2);
}

#[test]
fn calendar_months_use_the_reference_offset() {
    // 22:00 UTC on the 26th is already the 27th at +03:00.
    let now = "2024-07-26T22:00:00Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(calendar_month_count(&now, &reference()), 1);

    let earlier = "2024-07-26T20:00:00Z".parse::<DateTime<Utc>>().unwrap();
    assert_eq!(calendar_month_count(&earlier, &reference()), 0);
}

#[test]
fn total_seconds_is_floored_difference_and_decomposition_is_lossless() {
    let reference = reference();
    let offsets_ms = [
        0_i64,
        999,
        1_000,
        59_999,
        3_600_000,
        86_399_999,
        31_557_600_123,
        94_672_800_000,
        -1,
        -90_000,
        -86_400_001,
    ];

    for offset in offsets_ms {
        let now = reference + Duration::milliseconds(offset);
        let breakdown = compute(&now, &reference);
        assert_eq!(breakdown.total_seconds, offset.div_euclid(1_000), "offset {offset}");
        assert_reconstructs(&breakdown);
        assert!((0..24).contains(&breakdown.hours));
        assert!((0..60).contains(&breakdown.minutes));
        assert!((0..60).contains(&breakdown.seconds));
    }
}

#[test]
fn compute_is_idempotent() {
    let now = at("2025-02-03T04:05:06+01:00");
    assert_eq!(compute(&now, &reference()), compute(&now, &reference()));
}

#[test]
fn cumulative_fields_never_decrease() {
    let reference = reference();
    let mut previous = compute(&reference, &reference);
    let mut now = reference;

    // Irregular steps crossing month ends, a leap day and a year boundary.
    for step_minutes in [1_i64, 59, 1_439, 10_079, 43_199, 44_641, 525_959, 61, 1] {
        for _ in 0..6 {
            now += Duration::minutes(step_minutes);
            let current = compute(&now, &reference);
            assert!(current.total_seconds >= previous.total_seconds);
            assert!(current.total_minutes >= previous.total_minutes);
            assert!(current.total_hours >= previous.total_hours);
            assert!(current.total_days >= previous.total_days);
            assert!(current.years >= previous.years);
            assert!(
                current.total_months >= previous.total_months,
                "months went back at {now}"
            );
            previous = current;
        }
    }
}

#[test]
fn clock_before_reference_yields_negative_totals_without_panicking() {
    let breakdown = compute(&at("2024-06-27T19:01:30+03:00"), &reference());

    assert_eq!(breakdown.total_seconds, -90);
    assert_eq!(breakdown.total_minutes, -2);
    assert_eq!(breakdown.minutes, 58);
    assert_eq!(breakdown.seconds, 30);
    assert_eq!(breakdown.total_days, -1);
    assert_eq!(breakdown.total_months, 0);
    assert_reconstructs(&breakdown);

    let year_earlier = compute(&at("2023-05-01T00:00:00+03:00"), &reference());
    assert_eq!(year_earlier.total_months, -14);
    assert!(year_earlier.years < 0);
}
