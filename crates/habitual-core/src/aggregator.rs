//! Collection-level views over habits and their completion ledger.
//!
//! Functions here take the habit list and ledger by reference and return
//! new values; nothing is mutated in place. Views preserve the order of
//! the input collection, which is insertion order for stored habits.
//!
//! [`Tracker`] bundles both values into the single snapshot a host keeps
//! between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CollectionError;
use crate::habit::Habit;
use crate::ledger::{CompletionLedger, HabitProgress};
use crate::scheduler::is_due;

/// A habit due today and whether it has already been marked done.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueHabit<'a> {
    pub habit: &'a Habit,
    pub is_completed_today: bool,
}

/// A habit paired with its progress figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEntry<'a> {
    pub habit: &'a Habit,
    #[serde(flatten)]
    pub progress: HabitProgress,
}

impl ProgressEntry<'_> {
    pub fn percentage(&self) -> f64 {
        self.progress.percentage
    }
}

/// Habits due on `today`, each with its completion flag for that day.
pub fn due_today<'a>(
    habits: &'a [Habit],
    ledger: &CompletionLedger,
    today: NaiveDate,
) -> Vec<DueHabit<'a>> {
    habits
        .iter()
        .filter(|habit| is_due(habit, today))
        .map(|habit| DueHabit {
            habit,
            is_completed_today: ledger.is_complete(habit.name(), today),
        })
        .collect()
}

/// Every habit with its completion percentage.
pub fn all_with_progress<'a>(habits: &'a [Habit], ledger: &CompletionLedger) -> Vec<ProgressEntry<'a>> {
    habits
        .iter()
        .map(|habit| ProgressEntry {
            habit,
            progress: ledger.progress(habit),
        })
        .collect()
}

/// Habits whose recorded completions cover their whole span.
pub fn finished<'a>(habits: &'a [Habit], ledger: &CompletionLedger) -> Vec<&'a Habit> {
    habits.iter().filter(|habit| ledger.is_finished(habit)).collect()
}

/// Habits due on `today` that have not been marked done yet.
///
/// This is what a reminder collaborator polls; delivering the reminder is
/// left to the host.
pub fn pending_reminders<'a>(
    habits: &'a [Habit],
    ledger: &CompletionLedger,
    today: NaiveDate,
) -> Vec<&'a Habit> {
    due_today(habits, ledger, today)
        .into_iter()
        .filter(|due| !due.is_completed_today)
        .map(|due| due.habit)
        .collect()
}

/// Append `habit`, rejecting a name already present in the collection.
pub fn add_habit(habits: &[Habit], habit: Habit) -> Result<Vec<Habit>, CollectionError> {
    if habits.iter().any(|h| h.name() == habit.name()) {
        return Err(CollectionError::DuplicateName(habit.name().to_string()));
    }
    let mut next = habits.to_vec();
    next.push(habit);
    Ok(next)
}

/// Remove the habit named `habit_name` and prune its ledger entries.
///
/// Both new values are returned together; on error neither input changes.
pub fn delete_habit(
    habits: &[Habit],
    ledger: &CompletionLedger,
    habit_name: &str,
) -> Result<(Vec<Habit>, CompletionLedger), CollectionError> {
    let index = habits
        .iter()
        .position(|h| h.name() == habit_name)
        .ok_or_else(|| CollectionError::HabitNotFound(habit_name.to_string()))?;

    let mut next = habits.to_vec();
    next.remove(index);
    tracing::debug!(habit = habit_name, "deleted habit and pruned completions");
    Ok((next, ledger.prune_habit(habit_name)))
}

/// Record `habit_name` as done on `date`.
///
/// The date is not checked against the habit's schedule; completing a habit
/// on a day it was not due is allowed.
pub fn record_completion(
    habits: &[Habit],
    ledger: &CompletionLedger,
    habit_name: &str,
    date: NaiveDate,
) -> CompletionLedger {
    if !habits.iter().any(|h| h.name() == habit_name) {
        tracing::debug!(habit = habit_name, "recording completion for unknown habit");
    }
    ledger.mark_complete(habit_name, date)
}

/// Snapshot of the whole tracker state: habits in insertion order plus the
/// completion ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrackerRepr")]
pub struct Tracker {
    habits: Vec<Habit>,
    ledger: CompletionLedger,
}

#[derive(Deserialize)]
struct TrackerRepr {
    #[serde(default)]
    habits: Vec<Habit>,
    #[serde(default)]
    ledger: CompletionLedger,
}

impl TryFrom<TrackerRepr> for Tracker {
    type Error = CollectionError;

    fn try_from(repr: TrackerRepr) -> Result<Self, Self::Error> {
        Tracker::new(repr.habits, repr.ledger)
    }
}

impl Tracker {
    /// Build a snapshot, rejecting duplicate habit names.
    pub fn new(habits: Vec<Habit>, ledger: CompletionLedger) -> Result<Self, CollectionError> {
        let mut seen = HashSet::new();
        if let Some(dup) = habits.iter().find(|h| !seen.insert(h.name())) {
            return Err(CollectionError::DuplicateName(dup.name().to_string()));
        }
        Ok(Self { habits, ledger })
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn habit(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.name() == name)
    }

    pub fn add_habit(&self, habit: Habit) -> Result<Self, CollectionError> {
        Ok(Self {
            habits: add_habit(&self.habits, habit)?,
            ledger: self.ledger.clone(),
        })
    }

    pub fn delete_habit(&self, habit_name: &str) -> Result<Self, CollectionError> {
        let (habits, ledger) = delete_habit(&self.habits, &self.ledger, habit_name)?;
        Ok(Self { habits, ledger })
    }

    pub fn record_completion(&self, habit_name: &str, date: NaiveDate) -> Self {
        Self {
            habits: self.habits.clone(),
            ledger: record_completion(&self.habits, &self.ledger, habit_name, date),
        }
    }

    pub fn due_today(&self, today: NaiveDate) -> Vec<DueHabit<'_>> {
        due_today(&self.habits, &self.ledger, today)
    }

    pub fn all_with_progress(&self) -> Vec<ProgressEntry<'_>> {
        all_with_progress(&self.habits, &self.ledger)
    }

    pub fn finished(&self) -> Vec<&Habit> {
        finished(&self.habits, &self.ledger)
    }

    pub fn pending_reminders(&self, today: NaiveDate) -> Vec<&Habit> {
        pending_reminders(&self.habits, &self.ledger, today)
    }
}
