use chrono::{Datelike, NaiveDate};
use clap::Args;
use habitual_core::{habit_color, month_view, shift_month, Config, HabitDb};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct CalendarArgs {
    /// Year to show (default: current year)
    #[arg(long)]
    year: Option<i32>,
    /// Month to show, 1-12 (default: current month)
    #[arg(long)]
    month: Option<u32>,
    /// Months to move forward (or back, if negative) from the chosen month
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    offset: i32,
}

pub fn run(args: CalendarArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let config = Config::load_or_default();
    let tracker = db.load()?;

    let (year, month) = shift_month(
        args.year.unwrap_or(today.year()),
        args.month.unwrap_or(today.month()),
        args.offset,
    )?;
    let view = month_view(tracker.habits(), year, month)?;

    let mut value = serde_json::to_value(&view)?;
    value["today"] = json!(today);
    if config.ui.color_habits {
        let legend: BTreeMap<&str, String> = tracker
            .habits()
            .iter()
            .map(|h| (h.name(), habit_color(h.name())))
            .collect();
        value["legend"] = json!(legend);
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
