//! # Habitual Core Library
//!
//! Business logic for the Habitual habit tracker. The core is a set of pure
//! functions over plain values: callers pass in the habit list, the
//! completion ledger and the current date, and get new values back. The
//! CLI binary is the imperative shell that reads the clock, loads and saves
//! state, and prints results.
//!
//! ## Architecture
//!
//! - **Habit**: validated habit definitions ([`Habit::create`])
//! - **Scheduler**: whether a habit is due on a date, month calendar layout
//! - **Ledger**: completion markers and progress percentages
//! - **Aggregator**: today / all / finished views and collection edits
//! - **Storage**: SQLite persistence and TOML configuration for the host
//!
//! ## Key Components
//!
//! - [`Tracker`]: snapshot of habits plus ledger owned by the host
//! - [`CompletionLedger`]: per-habit completion dates
//! - [`HabitDb`]: SQLite store
//! - [`Config`]: application configuration

pub mod aggregator;
pub mod assessment;
pub mod error;
pub mod habit;
pub mod ledger;
pub mod scheduler;
pub mod storage;

pub use aggregator::{DueHabit, ProgressEntry, Tracker};
pub use error::{CalendarError, CollectionError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{habit_color, DayOfWeek, Frequency, Habit, HabitDraft, HabitDuration, Lifecycle};
pub use ledger::{total_scheduled_days, CompletionLedger, HabitProgress};
pub use scheduler::{is_due, month_view, shift_month, MonthView};
pub use storage::{Config, HabitDb};
