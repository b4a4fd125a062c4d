//! Month calendar layout.
//!
//! Builds the data behind a Sunday-first month grid: how many blank cells
//! precede the first of the month, and which habits are due on each day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::is_due;
use crate::error::CalendarError;
use crate::habit::{DayOfWeek, Habit};

/// One day of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Names of the habits due that day, in collection order
    pub habits: Vec<String>,
}

/// A month laid out for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the first day (0 when the month starts on Sunday)
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })
}

/// Build the month grid for `year`/`month` (1-based month).
pub fn month_view(habits: &[Habit], year: i32, month: u32) -> Result<MonthView, CalendarError> {
    let first = first_of_month(year, month)?;
    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| DayCell {
            date,
            habits: habits
                .iter()
                .filter(|h| is_due(h, date))
                .map(|h| h.name().to_string())
                .collect(),
        })
        .collect();

    Ok(MonthView {
        year,
        month,
        leading_blanks: DayOfWeek::of(first).index(),
        days,
    })
}

/// Move `delta` months from `year`/`month`, wrapping across years.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), CalendarError> {
    first_of_month(year, month)?;
    let zero_based = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let new_year = zero_based.div_euclid(12);
    let new_month = zero_based.rem_euclid(12) as u32 + 1;
    let new_year = i32::try_from(new_year).map_err(|_| CalendarError::InvalidMonth { year, month })?;
    first_of_month(new_year, new_month)?;
    Ok((new_year, new_month))
}
