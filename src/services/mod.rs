//! Service layer for budget-tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, auditing and the budget evaluation.

pub mod budget;
pub mod transaction;

pub use budget::BudgetService;
pub use transaction::TransactionService;
