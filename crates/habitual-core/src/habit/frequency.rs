//! Frequency rules and weekday names.
//!
//! Weekdays follow the Sunday-first convention: `Sunday` has index 0 and
//! `Saturday` index 6, the same order the month calendar uses for its
//! columns. Weekday lookup goes through chrono and never depends on a locale.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a habit recurs inside its active range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Due on every day of the active range
    Everyday,
    /// Due only on the selected weekdays
    Weekly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Everyday => write!(f, "everyday"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "everyday" | "daily" => Ok(Frequency::Everyday),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All weekdays in Sunday-first order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Position in the week, 0 = Sunday ... 6 = Saturday.
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        DayOfWeek::ALL[day.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| format!("unknown weekday: {s}"))
    }
}
