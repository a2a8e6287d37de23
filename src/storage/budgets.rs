//! Budget repository for SQLite storage
//!
//! The unique index on `budgets(user_id, category)` backs the upsert, so a
//! pair never has more than one row.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::TrackerResult;
use crate::models::{Budget, CategorySpending, UserId};

/// Repository for budget persistence
pub struct BudgetRepository<'a> {
    conn: &'a Connection,
}

impl<'a> BudgetRepository<'a> {
    /// Create a repository over an open connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert or replace the ceiling for a (user, category) pair
    pub fn upsert(&self, user_id: UserId, category: &str, amount: f64) -> TrackerResult<Budget> {
        let budget = self.conn.query_row(
            "INSERT INTO budgets (user_id, category, budget) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, category) DO UPDATE SET budget = excluded.budget
             RETURNING id, user_id, category, budget",
            params![user_id, category, amount],
            from_row,
        )?;
        tracing::debug!(id = %budget.id, %user_id, category, amount, "upserted budget");
        Ok(budget)
    }

    /// Get the budget row for a (user, category) pair
    pub fn get(&self, user_id: UserId, category: &str) -> TrackerResult<Option<Budget>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, user_id, category, budget FROM budgets
                 WHERE user_id = ?1 AND category = ?2",
                params![user_id, category],
                from_row,
            )
            .optional()?)
    }

    /// Get all of a user's budgets, sorted by category
    pub fn list_by_user(&self, user_id: UserId) -> TrackerResult<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, category, budget FROM budgets
             WHERE user_id = ?1 ORDER BY category",
        )?;
        let rows = stmt
            .query_map(params![user_id], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Remove a (user, category) budget. Returns whether a row was removed.
    pub fn delete(&self, user_id: UserId, category: &str) -> TrackerResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM budgets WHERE user_id = ?1 AND category = ?2",
            params![user_id, category],
        )?;
        Ok(removed > 0)
    }

    /// Expense totals for every category that has both a budget and at least
    /// one transaction for the user. Income rows count towards "has a
    /// transaction" but not towards the total.
    pub fn spending_for_user(&self, user_id: UserId) -> TrackerResult<Vec<CategorySpending>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.category,
                    b.budget,
                    COALESCE(SUM(CASE WHEN t.type = 'expense' THEN t.amount ELSE 0 END), 0.0)
               FROM budgets b
               JOIN transactions t
                 ON t.user_id = b.user_id AND t.category = b.category
              WHERE b.user_id = ?1
              GROUP BY b.id, b.category, b.budget
              ORDER BY b.category",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(CategorySpending {
                    category: row.get(0)?,
                    budget: row.get(1)?,
                    spent: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        budget: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, TransactionType};
    use crate::storage::Database;

    fn rows_for(db: &Database, user: i64, category: &str) -> i64 {
        db.connection()
            .query_row(
                "SELECT COUNT(*) FROM budgets WHERE user_id = ?1 AND category = ?2",
                params![user, category],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.budgets();

        let stored = repo.upsert(UserId::new(1), "groceries", 500.0).unwrap();
        let loaded = repo.get(UserId::new(1), "groceries").unwrap().unwrap();

        assert_eq!(loaded, stored);
        assert_eq!(loaded.budget, 500.0);
    }

    #[test]
    fn test_upsert_replaces_existing_row() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.budgets();

        let first = repo.upsert(UserId::new(1), "groceries", 500.0).unwrap();
        let second = repo.upsert(UserId::new(1), "groceries", 650.0).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.budget, 650.0);
        assert_eq!(rows_for(&db, 1, "groceries"), 1);
    }

    #[test]
    fn test_pairs_are_independent() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.budgets();

        repo.upsert(UserId::new(1), "groceries", 500.0).unwrap();
        repo.upsert(UserId::new(2), "groceries", 100.0).unwrap();
        repo.upsert(UserId::new(1), "rent", 1000.0).unwrap();

        assert_eq!(repo.get(UserId::new(2), "groceries").unwrap().unwrap().budget, 100.0);
        let names: Vec<_> = repo
            .list_by_user(UserId::new(1))
            .unwrap()
            .into_iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(names, vec!["groceries", "rent"]);
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.budgets().get(UserId::new(1), "travel").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let repo = db.budgets();
        repo.upsert(UserId::new(1), "travel", 300.0).unwrap();

        assert!(repo.delete(UserId::new(1), "travel").unwrap());
        assert!(!repo.delete(UserId::new(1), "travel").unwrap());
        assert!(repo.get(UserId::new(1), "travel").unwrap().is_none());
    }

    #[test]
    fn test_spending_counts_expenses_only() {
        let db = Database::open_in_memory().unwrap();
        let budgets = db.budgets();
        let txns = db.transactions();
        let user = UserId::new(1);

        budgets.upsert(user, "groceries", 500.0).unwrap();
        budgets.upsert(user, "salary", 100.0).unwrap();
        budgets.upsert(user, "unused", 50.0).unwrap();

        txns.insert(&NewTransaction::new(user, TransactionType::Expense, 300.0, "groceries"))
            .unwrap();
        txns.insert(&NewTransaction::new(user, TransactionType::Expense, 250.0, "groceries"))
            .unwrap();
        txns.insert(&NewTransaction::new(user, TransactionType::Income, 1000.0, "salary"))
            .unwrap();
        txns.insert(&NewTransaction::new(user, TransactionType::Expense, 80.0, "no-budget"))
            .unwrap();

        let spending = budgets.spending_for_user(user).unwrap();

        assert_eq!(spending.len(), 2);
        assert_eq!(spending[0].category, "groceries");
        assert_eq!(spending[0].spent, 550.0);
        assert_eq!(spending[1].category, "salary");
        assert_eq!(spending[1].spent, 0.0);
    }
}
