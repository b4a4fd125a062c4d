//! Core error types for habitual-core.
//!
//! Validation failures are returned to the caller that submitted a habit
//! definition. The scheduling, ledger and aggregation queries never fail;
//! only construction, collection edits, calendar input, storage and
//! configuration produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitual-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Habit definition rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Collection-level constraint violated
    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    /// Calendar navigation errors
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a habit definition is rejected.
///
/// `Habit::create` checks these in declaration order and reports the first
/// one that applies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name, frequency, start date or end date not supplied
    #[error("Please fill out all required fields (missing {field})")]
    MissingField { field: &'static str },

    /// Start date lies before today
    #[error("Start date {start} cannot be in the past (today is {today})")]
    StartDateInPast {
        start: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    /// End date is not strictly later than the start date
    #[error("End date {end} must be later than the start date {start}")]
    EndDateNotAfterStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Both hours and minutes are zero
    #[error("Duration must be at least 15 minutes")]
    ZeroDuration,

    /// Weekly habit without any weekday
    #[error("Please select at least one day for weekly frequency")]
    NoWeekdaysSelected,

    /// Hours or minutes outside the selectable values
    #[error("Invalid duration {hours}h {minutes}m: hours must be 0-3 and minutes one of 0, 15, 30, 45")]
    InvalidDuration { hours: u8, minutes: u8 },
}

/// Errors raised when editing a habit collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A habit with the same name already exists
    #[error("A habit named '{0}' already exists")]
    DuplicateName(String),

    /// No habit with the given name
    #[error("Habit not found: {0}")]
    HabitNotFound(String),
}

/// Calendar navigation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Month outside 1..=12, or a year chrono cannot represent
    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row does not describe a valid habit
    #[error("Corrupt habit row '{name}': {message}")]
    CorruptRow { name: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        let err = ValidationError::MissingField { field: "name" };
        assert_eq!(
            err.to_string(),
            "Please fill out all required fields (missing name)"
        );
        assert_eq!(
            ValidationError::ZeroDuration.to_string(),
            "Duration must be at least 15 minutes"
        );
    }

    #[test]
    fn core_error_wraps_collection_error() {
        let err: CoreError = CollectionError::DuplicateName("Read".into()).into();
        assert!(matches!(
            err,
            CoreError::Collection(CollectionError::DuplicateName(_))
        ));
        assert_eq!(
            err.to_string(),
            "Collection error: A habit named 'Read' already exists"
        );
    }

    #[test]
    fn sqlite_errors_map_to_query_failed() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }
}
