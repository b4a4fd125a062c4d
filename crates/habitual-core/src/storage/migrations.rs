//! Database schema migrations for habitual.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Apply all pending migrations.
///
/// # Errors
/// Returns an error if a migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = schema_version(conn);
    if current_version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Current schema version, 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

/// Migration v1: habits and completions tables.
///
/// `position` keeps insertion order stable across deletes.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE,
            frequency   TEXT NOT NULL,
            days        TEXT NOT NULL DEFAULT '[]',
            hours       INTEGER NOT NULL,
            minutes     INTEGER NOT NULL,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            position    INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS completions (
            habit_name  TEXT NOT NULL,
            date        TEXT NOT NULL,
            PRIMARY KEY (habit_name, date)
        );

        CREATE INDEX IF NOT EXISTS idx_habits_position ON habits(position);",
    )?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [1])?;

    tx.commit()?;
    tracing::info!(version = 1, "applied schema migration");
    Ok(())
}
