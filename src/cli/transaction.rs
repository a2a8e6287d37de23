//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::TrackerResult;
use crate::models::{TransactionId, TransactionType, UserId};
use crate::services::TransactionService;
use crate::storage::Database;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// "income" or "expense"
        #[arg(value_name = "TYPE")]
        kind: TransactionType,
        /// Amount (e.g., "42" or "42.50")
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Category label
        category: String,
        /// Timestamp (defaults to now)
        #[arg(short, long)]
        date: Option<String>,
        /// User id (defaults to the configured user)
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// Delete a transaction by id
    #[command(alias = "rm")]
    Delete {
        /// Transaction id
        id: TransactionId,
    },

    /// Show one transaction in detail
    Show {
        /// Transaction id
        id: TransactionId,
    },

    /// List a user's transactions
    #[command(alias = "ls")]
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// User id (defaults to the configured user)
        #[arg(short, long)]
        user: Option<i64>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    db: &Database,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = TransactionService::new(db);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            user,
        } => {
            let user_id = resolve_user(settings, user);
            let id = service.add_transaction(user_id, kind, amount, &category, date.as_deref())?;
            println!("Added {} transaction {} ({:.2} in '{}')", kind, id, amount, category.trim());
        }

        TransactionCommands::Delete { id } => {
            service.delete_transaction(id)?;
            println!("Deleted transaction {}", id);
        }

        TransactionCommands::Show { id } => match service.get(id)? {
            Some(txn) => print!(
                "{}",
                format_transaction_details(&txn, &settings.currency_symbol)
            ),
            None => println!("Transaction {} not found", id),
        },

        TransactionCommands::List { category, user } => {
            let user_id = resolve_user(settings, user);
            let transactions = service.list_transactions(user_id, category.as_deref())?;
            print!(
                "{}",
                format_transaction_register(&transactions, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

/// Explicit `--user` wins over the configured default
pub(crate) fn resolve_user(settings: &Settings, user: Option<i64>) -> UserId {
    UserId::new(user.unwrap_or(settings.default_user_id))
}
