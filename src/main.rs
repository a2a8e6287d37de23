use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_tracker::cli::{
    handle_budget_command, handle_transaction_command, BudgetCommands, TransactionCommands,
};
use budget_tracker::config::{paths::TrackerPaths, settings::Settings};
use budget_tracker::audit::AuditLogger;
use budget_tracker::storage;

#[derive(Parser)]
#[command(
    name = "budget-tracker",
    version,
    about = "Track income and expenses and check them against category budgets"
)]
struct Cli {
    /// Database file (defaults to <data dir>/tracker.db)
    #[arg(long, global = true, env = "BUDGET_TRACKER_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the most recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Create the data directory, settings file and database
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut paths = TrackerPaths::new()?;
    if let Some(db) = cli.db {
        paths = paths.with_database_file(db);
    }
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            let db = storage::connect(&paths, settings.audit_enabled)?;
            handle_transaction_command(&db, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let db = storage::connect(&paths, settings.audit_enabled)?;
            handle_budget_command(&db, &settings, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry);
            }
        }
        Some(Commands::Init) => {
            println!("Initializing budget-tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage::connect(&paths, settings.audit_enabled)?;
            println!("Database: {}", paths.database_file().display());
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("budget-tracker Configuration");
            println!("============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Database:       {}", paths.database_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default user:    {}", settings.default_user_id);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        None => {
            println!("budget-tracker - income, expenses and category budgets");
            println!();
            println!("Run 'budget-tracker --help' for usage information.");
        }
    }

    Ok(())
}
