//! Habit definitions.
//!
//! A [`Habit`] is built once through [`Habit::create`], which validates the
//! submitted [`HabitDraft`] against the current date, and is never edited in
//! place afterwards. Habits loaded back from storage go through
//! [`Habit::restore`], which re-checks the structural invariants but not
//! the start-date-in-the-past rule (a stored habit naturally ages).
//!
//! Lifecycle relative to a given day:
//!
//!   CREATED ──(start date)──> ACTIVE ──(after end date)──> EXPIRED
//!
//! Deletion is a collection operation, see [`crate::aggregator`].

mod color;
mod duration;
mod frequency;

pub use color::habit_color;
pub use duration::{HabitDuration, MAX_HOURS, MINUTE_STEPS};
pub use frequency::{DayOfWeek, Frequency};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;

/// Unvalidated habit form input.
///
/// Every field the form can leave blank is optional here so that
/// [`Habit::create`] can report which one is missing.
#[derive(Debug, Clone, Default)]
pub struct HabitDraft {
    pub name: Option<String>,
    pub frequency: Option<Frequency>,
    pub days_of_week: Vec<DayOfWeek>,
    pub duration: HabitDuration,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Where a habit stands relative to a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Start date not reached yet
    Created,
    /// Day lies inside the active range
    Active,
    /// End date has passed
    Expired,
}

/// A validated habit definition.
///
/// `name` is the key completions are recorded under and must be unique
/// within a collection. `id` is a stable identifier generated at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredHabit")]
pub struct Habit {
    id: String,
    name: String,
    frequency: Frequency,
    days_of_week: BTreeSet<DayOfWeek>,
    duration: HabitDuration,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Deserialize)]
struct StoredHabit {
    #[serde(default)]
    id: String,
    name: String,
    frequency: Frequency,
    #[serde(default)]
    days_of_week: BTreeSet<DayOfWeek>,
    duration: HabitDuration,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TryFrom<StoredHabit> for Habit {
    type Error = ValidationError;

    fn try_from(stored: StoredHabit) -> Result<Self, Self::Error> {
        let id = if stored.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            stored.id
        };
        Habit::restore(
            id,
            stored.name,
            stored.frequency,
            stored.days_of_week,
            stored.duration,
            stored.start_date,
            stored.end_date,
        )
    }
}

impl Habit {
    /// Validate a draft and build a new habit with a fresh id.
    ///
    /// Rules are checked in order and the first failure is returned:
    /// required fields, start date not before `today`, end date after start
    /// date, non-zero duration, at least one weekday for weekly habits.
    /// Name uniqueness is a collection concern and is not checked here.
    pub fn create(draft: HabitDraft, today: NaiveDate) -> Result<Self, ValidationError> {
        let name = draft
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ValidationError::MissingField { field: "name" })?;
        let frequency = draft
            .frequency
            .ok_or(ValidationError::MissingField { field: "frequency" })?;
        let start_date = draft
            .start_date
            .ok_or(ValidationError::MissingField { field: "start_date" })?;
        let end_date = draft
            .end_date
            .ok_or(ValidationError::MissingField { field: "end_date" })?;

        if start_date < today {
            return Err(ValidationError::StartDateInPast {
                start: start_date,
                today,
            });
        }
        if end_date <= start_date {
            return Err(ValidationError::EndDateNotAfterStart {
                start: start_date,
                end: end_date,
            });
        }
        if draft.duration.is_zero() {
            return Err(ValidationError::ZeroDuration);
        }
        let days_of_week = match frequency {
            Frequency::Weekly if draft.days_of_week.is_empty() => {
                return Err(ValidationError::NoWeekdaysSelected);
            }
            Frequency::Weekly => draft.days_of_week.into_iter().collect(),
            Frequency::Everyday => BTreeSet::new(),
        };

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            frequency,
            days_of_week,
            duration: draft.duration,
            start_date,
            end_date,
        })
    }

    /// Rebuild a habit from persisted fields.
    ///
    /// Checks that the name is not blank, that `start_date <= end_date`, that
    /// the duration is non-zero and that weekly habits name at least one
    /// weekday. Weekdays stored for an everyday habit are dropped.
    pub fn restore(
        id: String,
        name: String,
        frequency: Frequency,
        days_of_week: BTreeSet<DayOfWeek>,
        duration: HabitDuration,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if end_date < start_date {
            return Err(ValidationError::EndDateNotAfterStart {
                start: start_date,
                end: end_date,
            });
        }
        if duration.is_zero() {
            return Err(ValidationError::ZeroDuration);
        }
        let days_of_week = match frequency {
            Frequency::Weekly if days_of_week.is_empty() => {
                return Err(ValidationError::NoWeekdaysSelected);
            }
            Frequency::Weekly => days_of_week,
            Frequency::Everyday => BTreeSet::new(),
        };

        Ok(Self {
            id,
            name,
            frequency,
            days_of_week,
            duration,
            start_date,
            end_date,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Selected weekdays; empty for everyday habits.
    pub fn days_of_week(&self) -> &BTreeSet<DayOfWeek> {
        &self.days_of_week
    }

    pub fn duration(&self) -> HabitDuration {
        self.duration
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whether `date` lies inside the inclusive active range.
    pub fn in_active_range(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn lifecycle(&self, today: NaiveDate) -> Lifecycle {
        if today < self.start_date {
            Lifecycle::Created
        } else if today > self.end_date {
            Lifecycle::Expired
        } else {
            Lifecycle::Active
        }
    }

    /// Display color derived from the name.
    pub fn color(&self) -> String {
        habit_color(&self.name)
    }
}
