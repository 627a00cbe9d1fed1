use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket_budget::audit::AuditLogger;
use pocket_budget::cli::{
    handle_audit_command, handle_budget_command, handle_expense_command, handle_summary_command,
    BudgetCommands, ExpenseCommands,
};
use pocket_budget::config::{paths::BudgetPaths, settings::Settings};
use pocket_budget::services::BudgetBook;
use pocket_budget::storage::{JsonFileStore, StateStore};

/// Environment variable holding the diagnostic log filter
const LOG_ENV: &str = "POCKET_BUDGET_LOG";

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal monthly budget tracker",
    long_about = "pocket-budget keeps one monthly budget and a list of expenses, \
                  and shows how much of the budget each month has used, with a \
                  breakdown by category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Budget(BudgetCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show the monthly report
    #[command(alias = "report")]
    Summary {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write config.json with every setting filled in
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let store = JsonFileStore::new(&paths)?;
    let audit = AuditLogger::new(paths.audit_log());
    let mut book = BudgetBook::open(store);
    if settings.audit_enabled {
        book = book.with_audit(audit.clone());
    }

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut book, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut book, &settings, cmd)?;
        }
        Some(Commands::Summary { period }) => {
            handle_summary_command(&book, &settings, period.as_deref())?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&audit, settings.audit_enabled, count)?;
        }
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }

            println!("pocket-budget Configuration");
            println!("===========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!(
                "Saved data:       {}",
                if book.store().exists() { "yes" } else { "none yet" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Calendar zone:   {}", settings.calendar_zone);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("pocket-budget - personal monthly budget tracker");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget summary' to see this month's report.");
        }
    }

    Ok(())
}
