//! Core data models for budget-tracker

pub mod budget;
pub mod ids;
pub mod transaction;

pub use budget::{
    validate_budget_amount, Budget, BudgetCheck, BudgetValidationError, CategorySpending,
};
pub use ids::{BudgetId, TransactionId, UserId};
pub use transaction::{
    NewTransaction, Transaction, TransactionType, TransactionValidationError,
    UnknownTransactionType, DATE_FORMAT,
};
