use chrono::NaiveDate;
use habitual_core::{Config, HabitDb};

/// Print one line per habit still pending today.
///
/// Prints nothing when reminders are disabled in the config.
pub fn run(today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if !config.reminders.enabled {
        tracing::debug!("reminders disabled");
        return Ok(());
    }

    let tracker = HabitDb::open()?.load()?;
    for habit in tracker.pending_reminders(today) {
        let duration = habit.duration();
        println!(
            "Reminder: {} ({}h {:02}m) is due today",
            habit.name(),
            duration.hours(),
            duration.minutes()
        );
    }
    Ok(())
}
