//! View-mode formatter.
//!
//! # Responsibility
//! - Select the breakdown fields each mode shows.
//! - Apply singular/plural nouns per field and locale digit grouping for
//!   totals.
//!
//! # Invariants
//! - Values are printed as computed; nothing is rounded.
//! - Mode 0 always yields five ` | `-separated segments, mode 1 three,
//!   mode 2 three and mode 3 one.
//! - Number and unit are joined by a non-breaking space.

use crate::model::elapsed::DurationBreakdown;
use crate::model::view_mode::ViewMode;
use crate::view::number_format::NumberFormat;

/// Joins the segments of one display string.
pub const SEGMENT_SEPARATOR: &str = " | ";
const UNIT_SPACE: char = '\u{00A0}';

thread_local! {
    static HOST_FORMAT: NumberFormat = NumberFormat::system();
}

/// Formats `breakdown` for `mode`, grouping totals for the host locale.
pub fn format_elapsed(breakdown: &DurationBreakdown, mode: ViewMode) -> String {
    HOST_FORMAT.with(|numbers| format_elapsed_with(breakdown, mode, numbers))
}

/// Formats `breakdown` for `mode`, grouping totals with `numbers`.
pub fn format_elapsed_with(
    breakdown: &DurationBreakdown,
    mode: ViewMode,
    numbers: &NumberFormat,
) -> String {
    let grouped = |value: i64| numbers.group(value);

    match mode {
        ViewMode::Default => [
            unit(breakdown.years, breakdown.years.to_string(), "year", "years"),
            unit(
                breakdown.days_after_years,
                breakdown.days_after_years.to_string(),
                "day",
                "days",
            ),
            unit(breakdown.hours, breakdown.hours.to_string(), "hour", "hours"),
            unit(
                breakdown.minutes,
                breakdown.minutes.to_string(),
                "minute",
                "minutes",
            ),
            unit(
                breakdown.seconds,
                breakdown.seconds.to_string(),
                "second",
                "seconds",
            ),
        ]
        .join(SEGMENT_SEPARATOR),
        ViewMode::MonthsAndWeeks => [
            unit(
                breakdown.total_months,
                breakdown.total_months.to_string(),
                "month",
                "months",
            ),
            unit(breakdown.weeks, breakdown.weeks.to_string(), "week", "weeks"),
            unit(
                breakdown.days_left,
                breakdown.days_left.to_string(),
                "day",
                "days",
            ),
        ]
        .join(SEGMENT_SEPARATOR),
        ViewMode::Totals => [
            unit(
                breakdown.total_days,
                grouped(breakdown.total_days),
                "day",
                "days",
            ),
            unit(
                breakdown.total_hours,
                grouped(breakdown.total_hours),
                "hour",
                "hours",
            ),
            unit(
                breakdown.total_minutes,
                grouped(breakdown.total_minutes),
                "minute",
                "minutes",
            ),
        ]
        .join(SEGMENT_SEPARATOR),
        ViewMode::Simple => format!(
            "{} together",
            unit(
                breakdown.total_days,
                grouped(breakdown.total_days),
                "day",
                "days"
            )
        ),
    }
}

fn unit(value: i64, rendered: String, singular: &str, plural: &str) -> String {
    let noun = if value == 1 { singular } else { plural };
    format!("{rendered}{UNIT_SPACE}{noun}")
}
