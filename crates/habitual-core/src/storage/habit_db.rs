//! SQLite-backed store for habits and completions.
//!
//! The store is the host's persistence for a [`Tracker`] snapshot. Deleting
//! a habit removes its row and its completions in one transaction.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::Path;

use super::{data_dir, migrations};
use crate::aggregator::Tracker;
use crate::error::{CollectionError, CoreError, DatabaseError, Result};
use crate::habit::{DayOfWeek, Frequency, Habit, HabitDuration};
use crate::ledger::CompletionLedger;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        DatabaseError::CorruptRow {
            name: name.to_string(),
            message: format!("bad date '{value}': {e}"),
        }
        .into()
    })
}

struct HabitRow {
    id: String,
    name: String,
    frequency: String,
    days: String,
    hours: u8,
    minutes: u8,
    start_date: String,
    end_date: String,
}

impl HabitRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            frequency: row.get(2)?,
            days: row.get(3)?,
            hours: row.get(4)?,
            minutes: row.get(5)?,
            start_date: row.get(6)?,
            end_date: row.get(7)?,
        })
    }

    fn into_habit(self) -> Result<Habit> {
        let corrupt = |message: String| -> CoreError {
            DatabaseError::CorruptRow {
                name: self.name.clone(),
                message,
            }
            .into()
        };
        let frequency: Frequency = self.frequency.parse().map_err(corrupt)?;
        let days: BTreeSet<DayOfWeek> =
            serde_json::from_str(&self.days).map_err(|e| corrupt(format!("bad days: {e}")))?;
        let duration =
            HabitDuration::new(self.hours, self.minutes).map_err(|e| corrupt(e.to_string()))?;
        let start_date = parse_date(&self.name, &self.start_date)?;
        let end_date = parse_date(&self.name, &self.end_date)?;
        Habit::restore(
            self.id.clone(),
            self.name.clone(),
            frequency,
            days,
            duration,
            start_date,
            end_date,
        )
        .map_err(|e| corrupt(e.to_string()))
    }
}

/// SQLite database holding habits and their completion dates.
pub struct HabitDb {
    conn: Connection,
}

impl HabitDb {
    /// Open the database at `<data dir>/habitual.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("habitual.db"))
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened habit database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Load every habit, in insertion order.
    pub fn list_habits(&self) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, frequency, days, hours, minutes, start_date, end_date
             FROM habits
             ORDER BY position",
        )?;
        let rows = stmt.query_map([], HabitRow::from_row)?;
        rows.map(|row| row.map_err(CoreError::from).and_then(HabitRow::into_habit))
            .collect()
    }

    pub fn get_habit(&self, name: &str) -> Result<Option<Habit>> {
        self.conn
            .query_row(
                "SELECT id, name, frequency, days, hours, minutes, start_date, end_date
                 FROM habits WHERE name = ?1",
                params![name],
                HabitRow::from_row,
            )
            .optional()?
            .map(HabitRow::into_habit)
            .transpose()
    }

    /// Load the full completion ledger.
    pub fn load_ledger(&self) -> Result<CompletionLedger> {
        let mut stmt = self
            .conn
            .prepare("SELECT habit_name, date FROM completions ORDER BY habit_name, date")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut ledger = CompletionLedger::new();
        for row in rows {
            let (name, date) = row?;
            ledger = ledger.mark_complete(&name, parse_date(&name, &date)?);
        }
        Ok(ledger)
    }

    /// Load habits and ledger as one snapshot.
    pub fn load(&self) -> Result<Tracker> {
        let habits = self.list_habits()?;
        let ledger = self.load_ledger()?;
        Ok(Tracker::new(habits, ledger)?)
    }

    /// Append a habit after all existing ones.
    ///
    /// # Errors
    /// Returns `DuplicateName` if a habit with the same name is stored.
    pub fn insert_habit(&self, habit: &Habit) -> Result<()> {
        if self.get_habit(habit.name())?.is_some() {
            return Err(CollectionError::DuplicateName(habit.name().to_string()).into());
        }
        Self::insert_row(&self.conn, habit)?;
        tracing::info!(habit = habit.name(), id = habit.id(), "habit added");
        Ok(())
    }

    fn insert_row(conn: &Connection, habit: &Habit) -> Result<()> {
        let days = serde_json::to_string(habit.days_of_week())?;
        conn.execute(
            "INSERT INTO habits (id, name, frequency, days, hours, minutes, start_date, end_date, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8,
                     (SELECT COALESCE(MAX(position), 0) + 1 FROM habits))",
            params![
                habit.id(),
                habit.name(),
                habit.frequency().to_string(),
                days,
                habit.duration().hours(),
                habit.duration().minutes(),
                format_date(habit.start_date()),
                format_date(habit.end_date()),
            ],
        )?;
        Ok(())
    }

    /// Mark `habit_name` done on `date`. Recording the same day twice is a
    /// no-op.
    pub fn record_completion(&self, habit_name: &str, date: NaiveDate) -> Result<()> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO completions (habit_name, date) VALUES (?1, ?2)",
            params![habit_name, format_date(date)],
        )?;
        tracing::info!(habit = habit_name, %date, new = inserted > 0, "completion recorded");
        Ok(())
    }

    /// Delete a habit and its completions in a single transaction.
    ///
    /// # Errors
    /// Returns `HabitNotFound` (and changes nothing) if no habit has that
    /// name.
    pub fn delete_habit(&self, habit_name: &str) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM habits WHERE name = ?1", params![habit_name])?;
        if removed == 0 {
            tx.rollback()?;
            return Err(CollectionError::HabitNotFound(habit_name.to_string()).into());
        }
        let pruned = tx.execute(
            "DELETE FROM completions WHERE habit_name = ?1",
            params![habit_name],
        )?;
        tx.commit()?;
        tracing::info!(habit = habit_name, pruned, "habit deleted");
        Ok(())
    }

    /// Replace all stored data with `tracker` in a single transaction.
    pub fn replace_all(&self, tracker: &Tracker) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DELETE FROM completions; DELETE FROM habits;")?;
        for habit in tracker.habits() {
            Self::insert_row(&tx, habit)?;
        }
        let ledger = tracker.ledger();
        for name in ledger.habit_names() {
            for date in ledger.completed_dates(name) {
                tx.execute(
                    "INSERT INTO completions (habit_name, date) VALUES (?1, ?2)",
                    params![name, format_date(date)],
                )?;
            }
        }
        tx.commit()?;
        tracing::info!(habits = tracker.habits().len(), "replaced stored tracker state");
        Ok(())
    }

    /// Snapshot as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_habit(name: &str, frequency: Frequency, days: &[DayOfWeek]) -> Habit {
        Habit::restore(
            format!("{name}-id"),
            name.into(),
            frequency,
            days.iter().copied().collect(),
            HabitDuration::new(1, 15).unwrap(),
            date(2024, 1, 1),
            date(2024, 1, 31),
        )
        .unwrap()
    }

    #[test]
    fn insert_and_list_in_order() {
        let db = HabitDb::open_memory().unwrap();
        db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap();
        db.insert_habit(&make_habit("Yoga", Frequency::Weekly, &[DayOfWeek::Monday, DayOfWeek::Friday]))
            .unwrap();
        db.insert_habit(&make_habit("Read", Frequency::Everyday, &[])).unwrap();

        let habits = db.list_habits().unwrap();
        let names: Vec<_> = habits.iter().map(Habit::name).collect();
        assert_eq!(names, vec!["Run", "Yoga", "Read"]);
        assert_eq!(habits[1], make_habit("Yoga", Frequency::Weekly, &[DayOfWeek::Monday, DayOfWeek::Friday]));
    }

    #[test]
    fn insert_duplicate_name_rejected() {
        let db = HabitDb::open_memory().unwrap();
        db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap();
        let err = db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Collection(CollectionError::DuplicateName(_))
        ));
    }

    #[test]
    fn completions_roundtrip_and_idempotent() {
        let db = HabitDb::open_memory().unwrap();
        db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap();
        db.record_completion("Run", date(2024, 1, 3)).unwrap();
        db.record_completion("Run", date(2024, 1, 3)).unwrap();
        db.record_completion("Run", date(2024, 1, 4)).unwrap();

        let ledger = db.load_ledger().unwrap();
        assert_eq!(ledger.completed_count("Run"), 2);
        assert!(ledger.is_complete("Run", date(2024, 1, 4)));
    }

    #[test]
    fn delete_removes_habit_and_completions() {
        let db = HabitDb::open_memory().unwrap();
        db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap();
        db.insert_habit(&make_habit("Read", Frequency::Everyday, &[])).unwrap();
        db.record_completion("Run", date(2024, 1, 3)).unwrap();
        db.record_completion("Read", date(2024, 1, 3)).unwrap();

        db.delete_habit("Run").unwrap();

        let tracker = db.load().unwrap();
        assert!(tracker.habit("Run").is_none());
        assert_eq!(tracker.ledger().completed_count("Run"), 0);
        assert_eq!(tracker.ledger().completed_count("Read"), 1);
    }

    #[test]
    fn delete_unknown_habit_changes_nothing() {
        let db = HabitDb::open_memory().unwrap();
        db.record_completion("Ghost", date(2024, 1, 3)).unwrap();
        let err = db.delete_habit("Ghost").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Collection(CollectionError::HabitNotFound(_))
        ));
        assert_eq!(db.load_ledger().unwrap().completed_count("Ghost"), 1);
    }

    #[test]
    fn corrupt_row_reported() {
        let db = HabitDb::open_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO habits (id, name, frequency, days, hours, minutes, start_date, end_date, position)
                 VALUES ('x', 'Bad', 'weekly', '[]', 1, 0, '2024-01-01', '2024-01-05', 1)",
                [],
            )
            .unwrap();
        let err = db.list_habits().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::CorruptRow { .. })
        ));
    }

    #[test]
    fn replace_all_and_export() {
        let db = HabitDb::open_memory().unwrap();
        db.insert_habit(&make_habit("Old", Frequency::Everyday, &[])).unwrap();

        let tracker = Tracker::default()
            .add_habit(make_habit("Run", Frequency::Everyday, &[]))
            .unwrap()
            .record_completion("Run", date(2024, 1, 2));
        db.replace_all(&tracker).unwrap();

        assert_eq!(db.load().unwrap(), tracker);
        let exported: Tracker = serde_json::from_str(&db.export_json().unwrap()).unwrap();
        assert_eq!(exported, tracker);
    }

    #[test]
    fn open_at_persists_between_connections() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("habitual.db");
        {
            let db = HabitDb::open_at(&path).unwrap();
            db.insert_habit(&make_habit("Run", Frequency::Everyday, &[])).unwrap();
            db.record_completion("Run", date(2024, 1, 1)).unwrap();
        }
        let db = HabitDb::open_at(&path).unwrap();
        let tracker = db.load().unwrap();
        assert_eq!(tracker.habits().len(), 1);
        assert_eq!(tracker.ledger().completed_count("Run"), 1);
    }
}
