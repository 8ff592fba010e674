//! Elapsed-time breakdown between the reference instant and "now".
//!
//! # Responsibility
//! - Decompose one signed millisecond difference into display fields.
//! - Count calendar months from year/month/day components.
//!
//! # Invariants
//! - `compute` is pure: identical inputs always give identical output.
//! - `total_days * 24 + hours == total_hours`,
//!   `total_hours * 60 + minutes == total_minutes` and
//!   `total_minutes * 60 + seconds == total_seconds` for every input,
//!   including `now < reference`.
//! - `years` uses a 365.25-day year while `total_months` is calendar-based.
//!   The two are computed independently and may disagree near boundaries.

use chrono::{DateTime, Datelike, FixedOffset, Months, TimeZone};

const MILLIS_PER_SECOND: i64 = 1_000;
/// Days per four average years (4 * 365.25), keeps the year split integral.
const DAYS_PER_FOUR_YEARS: i64 = 1_461;

/// Every field a view mode may display, derived from one `(reference, now)`.
///
/// Fields are signed: a clock set before the reference yields negative
/// values instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub total_seconds: i64,
    pub total_minutes: i64,
    pub total_hours: i64,
    pub total_days: i64,
    /// Whole average years (365.25 days each).
    pub years: i64,
    pub days_after_years: i64,
    /// Hour of the current day, `0..24`.
    pub hours: i64,
    /// Minute of the current hour, `0..60`.
    pub minutes: i64,
    /// Second of the current minute, `0..60`.
    pub seconds: i64,
    /// Whole calendar months, see [`calendar_month_count`].
    pub total_months: i64,
    /// Whole weeks since the calendar date of the last month anniversary.
    pub weeks: i64,
    /// Days after `weeks`, `0..7`.
    pub days_left: i64,
}

/// Computes the breakdown of `now - reference`.
///
/// Calendar fields are evaluated in the reference's UTC offset.
pub fn compute<Tz: TimeZone>(
    now: &DateTime<Tz>,
    reference: &DateTime<FixedOffset>,
) -> DurationBreakdown {
    let now = now.with_timezone(reference.offset());
    let diff_ms = now.signed_duration_since(*reference).num_milliseconds();

    let total_seconds = diff_ms.div_euclid(MILLIS_PER_SECOND);
    let total_minutes = total_seconds.div_euclid(60);
    let total_hours = total_minutes.div_euclid(60);
    let total_days = total_hours.div_euclid(24);

    let years = (total_days * 4).div_euclid(DAYS_PER_FOUR_YEARS);
    let days_after_years = total_days - (years * DAYS_PER_FOUR_YEARS).div_euclid(4);

    let total_months = calendar_month_count(&now, reference);
    let anchor = month_anchor(reference, total_months);
    // Calendar dates, not instants: the month count already rolls over at
    // midnight of the anniversary day, before the reference time of day.
    let days_since_anchor = (now.date_naive() - anchor.date_naive()).num_days();

    DurationBreakdown {
        total_seconds,
        total_minutes,
        total_hours,
        total_days,
        years,
        days_after_years,
        hours: total_hours.rem_euclid(24),
        minutes: total_minutes.rem_euclid(60),
        seconds: total_seconds.rem_euclid(60),
        total_months,
        weeks: days_since_anchor.div_euclid(7),
        days_left: days_since_anchor.rem_euclid(7),
    }
}

/// Whole calendar months between `reference` and `now`.
///
/// `(years * 12 + months)` minus one when `now`'s day-of-month is below the
/// reference's. Month lengths are ignored, so a reference on the 31st only
/// completes a month on a 31st or on the 1st of the month after.
pub fn calendar_month_count<Tz: TimeZone>(
    now: &DateTime<Tz>,
    reference: &DateTime<FixedOffset>,
) -> i64 {
    let now = now.with_timezone(reference.offset());
    let mut months = i64::from(now.year() - reference.year()) * 12
        + i64::from(now.month())
        - i64::from(reference.month());
    if now.day() < reference.day() {
        months -= 1;
    }
    months
}

/// Reference advanced by `months` calendar months, clamped to month end.
fn month_anchor(reference: &DateTime<FixedOffset>, months: i64) -> DateTime<FixedOffset> {
    let step = Months::new(u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX));
    let shifted = if months >= 0 {
        reference.checked_add_months(step)
    } else {
        reference.checked_sub_months(step)
    };
    shifted.unwrap_or(*reference)
}
