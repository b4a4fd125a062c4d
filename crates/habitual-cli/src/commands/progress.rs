//! Progress views and completion recording.

use chrono::NaiveDate;
use clap::Subcommand;
use habitual_core::{Config, HabitDb};
use serde_json::json;

use super::habit_json;

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Habits due today and whether each is done
    Today,
    /// Completion percentage of every habit
    All,
    /// Habits whose completions cover their whole span
    Finished,
}

pub fn run(action: ProgressAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let config = Config::load_or_default();
    let tracker = db.load()?;

    let view = match action {
        ProgressAction::Today => tracker
            .due_today(today)
            .into_iter()
            .map(|due| -> Result<_, serde_json::Error> {
                let progress = tracker.ledger().progress(due.habit);
                Ok(json!({
                    "habit": habit_json(due.habit, &config)?,
                    "is_completed_today": due.is_completed_today,
                    "percentage": progress.percentage,
                    "remaining": progress.remaining,
                }))
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?,
        ProgressAction::All => tracker
            .all_with_progress()
            .into_iter()
            .map(|entry| -> Result<_, serde_json::Error> {
                let mut value = serde_json::to_value(&entry.progress)?;
                value["habit"] = habit_json(entry.habit, &config)?;
                Ok(value)
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?,
        ProgressAction::Finished => tracker
            .finished()
            .into_iter()
            .map(|habit| habit_json(habit, &config))
            .collect::<Result<Vec<_>, serde_json::Error>>()?,
    };

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Record `name` as done on `today`.
///
/// Unlike the core, the CLI refuses names that are not in the store so that
/// typos do not leave orphaned completions behind.
pub fn complete(name: &str, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let tracker = db.load()?;
    let habit = tracker
        .habit(name)
        .ok_or_else(|| format!("Habit not found: {name}"))?;
    if tracker.ledger().is_complete(name, today) {
        println!("Already completed: {name} on {today}");
        return Ok(());
    }

    db.record_completion(name, today)?;
    let progress = tracker.record_completion(name, today).ledger().progress(habit);
    println!("Completed: {name} on {today}");
    println!("{}", serde_json::to_string_pretty(&progress)?);
    Ok(())
}
