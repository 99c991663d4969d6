//! Calendar utilities module
//!
//! Working-day arithmetic, blackout exclusion, and date parsing. All date
//! arithmetic in the engine routes through this module so blackout behavior
//! is enabled or disabled coherently. Month-to-day conversion is uniformly
//! 30 days by convention.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::errors::EngineError;

/// Parses `YYYY-MM-DD` or ISO-8601 with a time suffix into a date.
///
/// # Arguments
///
/// * `value` - The date string to parse
///
/// # Returns
///
/// The parsed date, or `EngineError::InvalidDate` on malformed input
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, EngineError> {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(value.to_string()))
}

/// Checks whether a date falls on a weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Checks whether a date is a working day.
///
/// With enforcement disabled every date is a working day; with it enabled,
/// weekends and blackout dates are excluded.
pub fn is_working_day(date: NaiveDate, blackouts: &[NaiveDate], enforce: bool) -> bool {
    if !enforce {
        return true;
    }
    !is_weekend(date) && !blackouts.contains(&date)
}

/// Advances `count` working days from `start`, skipping weekends and
/// blackouts when enforcement is on; plain calendar addition otherwise.
pub fn add_working_days(
    start: NaiveDate,
    count: i64,
    blackouts: &[NaiveDate],
    enforce: bool,
) -> NaiveDate {
    if !enforce {
        return start + Duration::days(count);
    }
    let mut current = start;
    let mut added = 0;
    while added < count {
        current += Duration::days(1);
        if is_working_day(current, blackouts, true) {
            added += 1;
        }
    }
    current
}

/// Returns `date` or the first working day after it.
pub fn next_working_day(date: NaiveDate, blackouts: &[NaiveDate], enforce: bool) -> NaiveDate {
    let mut current = date;
    while !is_working_day(current, blackouts, enforce) {
        current += Duration::days(1);
    }
    current
}

/// Calendar days from `a` to `b` (negative when `b` precedes `a`).
pub fn duration_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Whole months from `a` to `b` by year-and-month subtraction.
///
/// Day-of-month is ignored; this is the `months_delay` rule used by the
/// slack-cost penalty.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b.year() as i64 - a.year() as i64) * 12 + (b.month() as i64 - a.month() as i64)
}
