//! Calendar helpers.

use chrono::{Datelike, NaiveDate, Weekday};

/// First and last day of a calendar month, or `None` for an invalid month.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// Number of Monday–Friday days in a month. Holidays are not considered.
#[must_use]
pub fn business_days_in_month(year: i32, month: u32) -> Option<u32> {
    let (first, last) = month_bounds(year, month)?;
    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .fold(0u32, |n, _| n + 1);
    Some(days)
}
