use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habitual habit tracker CLI")]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Mark a habit as done for today
    Complete {
        /// Habit name
        name: String,
    },
    /// Progress views
    Progress {
        #[command(subcommand)]
        action: commands::progress::ProgressAction,
    },
    /// Month calendar of due habits
    Calendar(commands::calendar::CalendarArgs),
    /// Habits due today that are not done yet
    Remind,
    /// Self-assessment questionnaire
    Assess(commands::assess::AssessArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Export or import the full tracker state
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!(%today, "resolved current date");

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action, today),
        Commands::Complete { name } => commands::progress::complete(&name, today),
        Commands::Progress { action } => commands::progress::run(action, today),
        Commands::Calendar(args) => commands::calendar::run(args, today),
        Commands::Remind => commands::remind::run(today),
        Commands::Assess(args) => commands::assess::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitual", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
