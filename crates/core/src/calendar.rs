//! Calendar-grid derivation for the progress overview.
//!
//! Turns a flat list of log timestamps into a 7-column month grid: leading
//! blank cells up to the weekday of the month's first day (0 = Sunday),
//! then one cell per day annotated with the number of logs created on that
//! calendar day.
//!
//! Day membership is computed in the viewer's time zone, passed explicitly
//! as a fixed offset in minutes east of UTC rather than read from the
//! platform. A stored UTC instant belongs to the calendar day it shifts to
//! under that offset, so logs at 23:50 and 00:10 local land on different
//! days even when both fall on the same UTC date.

use chrono::{Datelike, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest legal UTC offset, in minutes (UTC+14:00 / UTC-14:00).
const MAX_TZ_OFFSET_MINS: i32 = 14 * 60;

/// One day cell in the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// Day of month, 1-based.
    pub day: u32,
    /// Number of logs created on this calendar day.
    pub count: usize,
}

/// A derived 7-column month grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    /// Month, 1-based.
    pub month: u32,
    /// Blank cells before day 1; equals the weekday index of the month's
    /// first day, where Sunday is 0.
    pub leading_blanks: u32,
    /// One cell per day of the month, in order.
    pub days: Vec<DayCell>,
}

/// Build the viewer's fixed offset from minutes east of UTC.
///
/// Rejects offsets outside the real-world ±14 h range.
pub fn viewer_offset(tz_offset_mins: i32) -> Result<FixedOffset, CoreError> {
    if tz_offset_mins.abs() > MAX_TZ_OFFSET_MINS {
        return Err(CoreError::Validation(format!(
            "tz_offset_mins must be between -{MAX_TZ_OFFSET_MINS} and {MAX_TZ_OFFSET_MINS}"
        )));
    }
    FixedOffset::east_opt(tz_offset_mins * 60)
        .ok_or_else(|| CoreError::Validation("Invalid tz_offset_mins".into()))
}

/// The calendar day a UTC instant falls on in the viewer's zone.
pub fn local_date(ts: Timestamp, offset: FixedOffset) -> NaiveDate {
    ts.with_timezone(&offset).date_naive()
}

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> Result<u32, CoreError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Validation(format!("Invalid month: {year}-{month:02}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| CoreError::Validation(format!("Invalid month: {year}-{month:02}")))?;
    Ok((next - first).num_days() as u32)
}

/// Derive the month grid for `year`/`month` from the full log timestamp
/// sequence. Timestamps outside the displayed month are ignored.
pub fn month_grid(
    year: i32,
    month: u32,
    stamps: &[Timestamp],
    offset: FixedOffset,
) -> Result<MonthGrid, CoreError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Validation(format!("Invalid month: {year}-{month:02}")))?;
    let total_days = days_in_month(year, month)?;

    let mut counts = vec![0usize; total_days as usize];
    for &ts in stamps {
        let date = local_date(ts, offset);
        if date.year() == year && date.month() == month {
            counts[date.day() as usize - 1] += 1;
        }
    }

    let days = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DayCell {
            day: i as u32 + 1,
            count,
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
