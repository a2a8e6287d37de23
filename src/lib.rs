//! budget-tracker - personal income/expense tracking with budget checks
//!
//! Transactions and per-category budgets are stored in a local SQLite
//! database. The budget check sums each category's expenses and reports the
//! categories whose spending exceeds the configured ceiling.
//!
//! # Architecture
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, budgets and budget-check results
//! - `storage`: SQLite connection, schema and repositories
//! - `services`: Validation, auditing and the budget evaluator
//! - `audit`: Append-only audit log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::models::{TransactionType, UserId};
//! use budget_tracker::services::{BudgetService, TransactionService};
//! use budget_tracker::storage::Database;
//!
//! let db = Database::open("tracker.db")?;
//! let user = UserId::new(1);
//! BudgetService::new(&db).set_budget(user, "groceries", 500.0)?;
//! TransactionService::new(&db).add_transaction(user, TransactionType::Expense, 600.0, "groceries", None)?;
//! println!("{}", BudgetService::new(&db).check_budget(user)?);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
pub use storage::Database;
