//! Completion ledger and progress statistics.
//!
//! The ledger maps a habit name to the set of dates the habit was marked
//! done. Absence of a date means "not completed"; there is no explicit
//! false. Writes return a new ledger and leave the receiver untouched.
//!
//! Percentages divide the number of recorded dates by the length of the
//! habit's calendar span, not by its number of due dates. For weekly habits
//! this reads lower than a due-day ratio would. Completions are counted
//! whether or not they fall inside the active range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::habit::Habit;

/// Per-habit, per-date completion markers.
///
/// Serialized as `{ "<habit name>": { "YYYY-MM-DD": true } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LedgerRepr", into = "LedgerRepr")]
pub struct CompletionLedger {
    entries: BTreeMap<String, BTreeSet<NaiveDate>>,
}

type LedgerRepr = BTreeMap<String, BTreeMap<NaiveDate, bool>>;

impl From<LedgerRepr> for CompletionLedger {
    fn from(repr: LedgerRepr) -> Self {
        let entries = repr
            .into_iter()
            .map(|(name, dates)| {
                let done: BTreeSet<NaiveDate> = dates
                    .into_iter()
                    .filter_map(|(date, marked)| marked.then_some(date))
                    .collect();
                (name, done)
            })
            .filter(|(_, dates)| !dates.is_empty())
            .collect();
        Self { entries }
    }
}

impl From<CompletionLedger> for LedgerRepr {
    fn from(ledger: CompletionLedger) -> Self {
        ledger
            .entries
            .into_iter()
            .map(|(name, dates)| (name, dates.into_iter().map(|d| (d, true)).collect()))
            .collect()
    }
}

/// Progress figures for one habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitProgress {
    pub completed_days: usize,
    pub total_days: i64,
    /// Completed share of the span, 0-100, two decimals
    pub percentage: f64,
    /// `100 - percentage`, floored at zero
    pub remaining: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with `(habit_name, date)` marked complete. Marking twice is a
    /// no-op.
    pub fn mark_complete(&self, habit_name: &str, date: NaiveDate) -> Self {
        let mut next = self.clone();
        next.entries
            .entry(habit_name.to_string())
            .or_default()
            .insert(date);
        next
    }

    pub fn is_complete(&self, habit_name: &str, date: NaiveDate) -> bool {
        self.entries
            .get(habit_name)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Number of distinct dates marked for `habit_name`.
    pub fn completed_count(&self, habit_name: &str) -> usize {
        self.entries.get(habit_name).map_or(0, BTreeSet::len)
    }

    /// Marked dates for `habit_name`, ascending.
    pub fn completed_dates(&self, habit_name: &str) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.get(habit_name).into_iter().flatten().copied()
    }

    /// Ledger without any entries for `habit_name`.
    pub fn prune_habit(&self, habit_name: &str) -> Self {
        let mut next = self.clone();
        next.entries.remove(habit_name);
        next
    }

    /// Habit names that have at least one completion.
    pub fn habit_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Completion share of the habit's span, rounded to two decimals.
    ///
    /// A zero-length span yields 0 rather than NaN.
    pub fn completion_percentage(&self, habit: &Habit) -> f64 {
        let total = total_scheduled_days(habit);
        if total <= 0 {
            return 0.0;
        }
        let pct = round2(self.completed_count(habit.name()) as f64 / total as f64 * 100.0);
        if pct.is_finite() {
            pct
        } else {
            0.0
        }
    }

    /// Whether the recorded dates cover the whole span.
    pub fn is_finished(&self, habit: &Habit) -> bool {
        let total = total_scheduled_days(habit);
        i64::try_from(self.completed_count(habit.name())).is_ok_and(|done| done >= total)
    }

    pub fn progress(&self, habit: &Habit) -> HabitProgress {
        let percentage = self.completion_percentage(habit);
        HabitProgress {
            completed_days: self.completed_count(habit.name()),
            total_days: total_scheduled_days(habit),
            percentage,
            remaining: round2((100.0 - percentage).max(0.0)),
        }
    }
}

/// Inclusive number of calendar days from start to end date.
pub fn total_scheduled_days(habit: &Habit) -> i64 {
    (habit.end_date() - habit.start_date()).num_days() + 1
}
