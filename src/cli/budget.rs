//! Budget CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_amount, format_budget_check, format_budget_list};
use crate::error::TrackerResult;
use crate::services::BudgetService;
use crate::storage::Database;

use super::transaction::resolve_user;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set (or replace) the budget for a category
    Set {
        /// Category label
        category: String,
        /// Spending ceiling
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// User id (defaults to the configured user)
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// Show the budget for a category
    Get {
        /// Category label
        category: String,
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// List all budgets
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// Remove the budget for a category
    #[command(alias = "rm")]
    Remove {
        /// Category label
        category: String,
        #[arg(short, long)]
        user: Option<i64>,
    },

    /// Report categories where spending exceeds the budget
    Check {
        #[arg(short, long)]
        user: Option<i64>,
        /// Show the per-category comparison
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    db: &Database,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(db);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            user,
        } => {
            let user_id = resolve_user(settings, user);
            service.set_budget(user_id, &category, amount)?;
            println!(
                "Budget for '{}' set to {}",
                category.trim(),
                format_amount(amount, currency)
            );
        }

        BudgetCommands::Get { category, user } => {
            let user_id = resolve_user(settings, user);
            match service.get_budget(user_id, &category)? {
                Some(amount) => println!("{}: {}", category.trim(), format_amount(amount, currency)),
                None => println!("No budget set for '{}'", category.trim()),
            }
        }

        BudgetCommands::List { user } => {
            let user_id = resolve_user(settings, user);
            let budgets = service.list_budgets(user_id)?;
            print!("{}", format_budget_list(&budgets, currency));
        }

        BudgetCommands::Remove { category, user } => {
            let user_id = resolve_user(settings, user);
            service.remove_budget(user_id, &category)?;
            println!("Removed budget for '{}'", category.trim());
        }

        BudgetCommands::Check { user, verbose } => {
            let user_id = resolve_user(settings, user);
            if verbose {
                let check = service.evaluate(user_id)?;
                print!("{}", format_budget_check(&check, currency));
            } else {
                println!("{}", service.check_budget(user_id)?);
            }
        }
    }

    Ok(())
}
