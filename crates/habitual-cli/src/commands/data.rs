use clap::Subcommand;
use habitual_core::{HabitDb, Tracker};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DataAction {
    /// Print all habits and completions as JSON
    Export,
    /// Replace all stored data with a JSON snapshot produced by `export`
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    match action {
        DataAction::Export => {
            println!("{}", db.export_json()?);
        }
        DataAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let tracker: Tracker = serde_json::from_str(&content)?;
            db.replace_all(&tracker)?;
            println!("Imported {} habits", tracker.habits().len());
        }
    }
    Ok(())
}
