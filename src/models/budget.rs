//! Budget model
//!
//! A per-user, per-category spending ceiling, plus the result types produced
//! when spending is compared against those ceilings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};

/// A stored budget row. At most one exists per (user_id, category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub user_id: UserId,
    pub category: String,
    /// Spending ceiling
    pub budget: f64,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.category, self.budget)
    }
}

/// Check a budget ceiling before it is stored
pub fn validate_budget_amount(category: &str, amount: f64) -> Result<(), BudgetValidationError> {
    if category.trim().is_empty() {
        return Err(BudgetValidationError::EmptyCategory);
    }
    if !amount.is_finite() {
        return Err(BudgetValidationError::NonFiniteBudget);
    }
    if amount < 0.0 {
        return Err(BudgetValidationError::NegativeBudget);
    }
    Ok(())
}

/// Spending against one budgeted category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    /// Configured ceiling
    pub budget: f64,
    /// Sum of expense amounts in the category
    pub spent: f64,
}

impl CategorySpending {
    /// Spending strictly above the ceiling
    pub fn is_exceeded(&self) -> bool {
        self.spent > self.budget
    }

    /// How far over the ceiling spending is (zero when within budget)
    pub fn overage(&self) -> f64 {
        (self.spent - self.budget).max(0.0)
    }
}

/// Outcome of comparing a user's spending with their budgets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetCheck {
    pub user_id: UserId,
    /// Every category with both a budget and at least one transaction,
    /// sorted by category name
    pub categories: Vec<CategorySpending>,
}

impl BudgetCheck {
    /// Categories whose spending exceeds the ceiling
    pub fn exceeded(&self) -> impl Iterator<Item = &CategorySpending> {
        self.categories.iter().filter(|c| c.is_exceeded())
    }

    /// True when no category is over budget
    pub fn is_within_budget(&self) -> bool {
        self.exceeded().next().is_none()
    }
}

impl fmt::Display for BudgetCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_within_budget() {
            return write!(f, "All categories are within budget.");
        }

        let mut first = true;
        for c in self.exceeded() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(
                f,
                "Warning: You have exceeded your budget for {} (spent {:.2} of {:.2}, over by {:.2})",
                c.category,
                c.spent,
                c.budget,
                c.overage()
            )?;
        }
        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeBudget,
    NonFiniteBudget,
    EmptyCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
            Self::NonFiniteBudget => write!(f, "Budget amount must be a finite number"),
            Self::EmptyCategory => write!(f, "Budget category cannot be empty"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
