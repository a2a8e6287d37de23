//! Budget service
//!
//! Sets and reads per-category ceilings and compares each user's expense
//! totals against them.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{validate_budget_amount, Budget, BudgetCheck, UserId};
use crate::storage::Database;

/// Service for budget management
pub struct BudgetService<'a> {
    db: &'a Database,
}

impl<'a> BudgetService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Set the ceiling for a category, replacing any previous value
    pub fn set_budget(&self, user_id: UserId, category: &str, amount: f64) -> TrackerResult<()> {
        let category = category.trim();
        validate_budget_amount(category, amount)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.db.in_transaction(|db| {
            let repo = db.budgets();
            let before = repo.get(user_id, category)?;
            let after = repo.upsert(user_id, category, amount)?;

            let entry = match &before {
                Some(old) => {
                    AuditEntry::updated(EntityType::Budget, after.id.to_string(), old, &after)
                        .with_summary(format!(
                            "{}: {:.2} -> {:.2}",
                            category, old.budget, after.budget
                        ))
                }
                None => AuditEntry::created(EntityType::Budget, after.id.to_string(), &after)
                    .with_summary(format!("{} = {:.2}", category, after.budget)),
            };
            db.log_audit(&entry.for_user(user_id.get()))
        })
    }

    /// The current ceiling for a category, if one is set
    pub fn get_budget(&self, user_id: UserId, category: &str) -> TrackerResult<Option<f64>> {
        Ok(self
            .db
            .budgets()
            .get(user_id, category.trim())?
            .map(|b| b.budget))
    }

    /// All of a user's budgets, sorted by category
    pub fn list_budgets(&self, user_id: UserId) -> TrackerResult<Vec<Budget>> {
        self.db.budgets().list_by_user(user_id)
    }

    /// Remove a category's budget. Removing an unset budget does nothing.
    pub fn remove_budget(&self, user_id: UserId, category: &str) -> TrackerResult<()> {
        let category = category.trim();
        self.db.in_transaction(|db| {
            let repo = db.budgets();
            let Some(existing) = repo.get(user_id, category)? else {
                return Ok(());
            };

            if repo.delete(user_id, category)? {
                db.log_audit(
                    &AuditEntry::deleted(EntityType::Budget, existing.id.to_string(), &existing)
                        .for_user(user_id.get()),
                )?;
            }
            Ok(())
        })
    }

    /// Compare expense totals against budgets for every category that has
    /// both a budget and at least one transaction
    pub fn evaluate(&self, user_id: UserId) -> TrackerResult<BudgetCheck> {
        let categories = self.db.budgets().spending_for_user(user_id)?;
        let check = BudgetCheck {
            user_id,
            categories,
        };
        tracing::debug!(
            %user_id,
            compared = check.categories.len(),
            exceeded = check.exceeded().count(),
            "evaluated budgets"
        );
        Ok(check)
    }

    /// Human-readable budget status for a user
    ///
    /// Names every over-budget category with "exceeded your budget for
    /// <category>", or reports that all categories are within budget.
    pub fn check_budget(&self, user_id: UserId) -> TrackerResult<String> {
        Ok(self.evaluate(user_id)?.to_string())
    }
}
