//! Habit management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use habitual_core::{
    scheduler, Config, DayOfWeek, Frequency, Habit, HabitDb, HabitDraft, HabitDuration,
};
use serde_json::json;

use super::habit_json;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name (must be unique)
        name: String,
        /// everyday or weekly
        #[arg(long)]
        frequency: Option<Frequency>,
        /// Comma-separated weekdays for weekly habits (e.g. Mon,Wed,Fri)
        #[arg(long, value_delimiter = ',')]
        days: Vec<DayOfWeek>,
        /// Hours per session (0-3)
        #[arg(long, default_value = "0")]
        hours: u8,
        /// Minutes per session (0, 15, 30 or 45)
        #[arg(long, default_value = "0")]
        minutes: u8,
        /// First day (YYYY-MM-DD, default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List habits in creation order
    List,
    /// Show one habit with its progress and due dates
    Show {
        /// Habit name
        name: String,
    },
    /// Delete a habit and its completion history
    Delete {
        /// Habit name
        name: String,
    },
}

pub fn run(action: HabitAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let config = Config::load_or_default();

    match action {
        HabitAction::Add {
            name,
            frequency,
            days,
            hours,
            minutes,
            start,
            end,
        } => {
            let draft = HabitDraft {
                name: Some(name),
                frequency,
                days_of_week: days,
                duration: HabitDuration::new(hours, minutes)?,
                start_date: Some(start.unwrap_or(today)),
                end_date: end,
            };
            let habit = Habit::create(draft, today)?;
            db.insert_habit(&habit)?;
            eprintln!("Habit added: {}", habit.name());
            println!("{}", serde_json::to_string_pretty(&habit_json(&habit, &config)?)?);
        }
        HabitAction::List => {
            let tracker = db.load()?;
            let habits = tracker
                .habits()
                .iter()
                .map(|h| -> Result<_, serde_json::Error> {
                    let mut value = habit_json(h, &config)?;
                    value["lifecycle"] = json!(h.lifecycle(today));
                    Ok(value)
                })
                .collect::<Result<Vec<_>, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Show { name } => {
            let tracker = db.load()?;
            let habit = tracker
                .habit(&name)
                .ok_or_else(|| format!("Habit not found: {name}"))?;
            let mut value = habit_json(habit, &config)?;
            value["lifecycle"] = json!(habit.lifecycle(today));
            value["progress"] = serde_json::to_value(tracker.ledger().progress(habit))?;
            value["due_today"] = json!(scheduler::is_due(habit, today));
            value["completed_dates"] =
                json!(tracker.ledger().completed_dates(habit.name()).collect::<Vec<_>>());
            value["due_dates"] = json!(scheduler::due_dates(habit).collect::<Vec<_>>());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        HabitAction::Delete { name } => {
            db.delete_habit(&name)?;
            println!("Habit deleted: {name}");
        }
    }
    Ok(())
}
