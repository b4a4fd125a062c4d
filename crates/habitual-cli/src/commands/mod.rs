pub mod assess;
pub mod calendar;
pub mod config;
pub mod data;
pub mod habit;
pub mod progress;
pub mod remind;

use habitual_core::{Config, Habit};
use serde_json::{json, Value};

/// JSON view of a habit, with its display color when enabled.
pub fn habit_json(habit: &Habit, config: &Config) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(habit)?;
    if config.ui.color_habits {
        if let Some(obj) = value.as_object_mut() {
            obj.insert("color".into(), json!(habit.color()));
        }
    }
    Ok(value)
}
