//! Calendar helpers for year-based anchor arithmetic.
//!
//! Anchors are rebuilt per year from a `(month, day)` pair instead of being
//! shifted from a previous date, so a February 29 anchor returns to
//! February 29 in every leap year.

use chrono::{Datelike, Months, NaiveDate};

/// Builds the `(month, day)` anniversary in `year`.
///
/// A day that does not exist in that year's month falls back to the last
/// day of the month (February 29 becomes February 28 in common years).
/// Returns `None` for an invalid month or a year outside chrono's range.
pub(crate) fn anniversary(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| (28..day).rev().find_map(|d| NaiveDate::from_ymd_opt(year, month, d)))
}

/// Offsets a calendar year by a number of years.
pub(crate) fn offset_year(year: i32, years: i64) -> Option<i32> {
    i32::try_from(i64::from(year).checked_add(years)?).ok()
}

/// Adds whole calendar years to an arbitrary date, clamping to month end.
pub(crate) fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(years.checked_mul(12)?))
}

/// Returns the year of `date` offset by `years`.
pub(crate) fn year_of(date: NaiveDate, years: i64) -> Option<i32> {
    offset_year(date.year(), years)
}
