//! Transaction repository for SQLite storage
//!
//! Every call round-trips to the `transactions` table; nothing is cached.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::TrackerResult;
use crate::models::{NewTransaction, Transaction, TransactionId, UserId};

const SELECT_COLUMNS: &str = "SELECT id, user_id, type, amount, category, date FROM transactions";

/// Repository for transaction persistence
pub struct TransactionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionRepository<'a> {
    /// Create a repository over an open connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a transaction and return the stored row
    pub fn insert(&self, txn: &NewTransaction) -> TrackerResult<Transaction> {
        let date = txn.resolved_date();
        self.conn.execute(
            "INSERT INTO transactions (user_id, type, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![txn.user_id, txn.kind, txn.amount, txn.category, date],
        )?;

        let id = TransactionId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, user_id = %txn.user_id, "inserted transaction");

        Ok(Transaction {
            id,
            user_id: txn.user_id,
            kind: txn.kind,
            amount: txn.amount,
            category: txn.category.clone(),
            date,
        })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        Ok(self
            .conn
            .query_row(&sql, params![id], from_row)
            .optional()?)
    }

    /// Delete a transaction. Returns whether a row was removed.
    pub fn delete(&self, id: TransactionId) -> TrackerResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        tracing::debug!(%id, removed, "deleted transaction");
        Ok(removed > 0)
    }

    /// Get a user's transactions, optionally limited to one category
    pub fn list_by_user(
        &self,
        user_id: UserId,
        category: Option<&str>,
    ) -> TrackerResult<Vec<Transaction>> {
        let sql = format!(
            "{} WHERE user_id = ?1 AND (?2 IS NULL OR category = ?2) ORDER BY id",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id, category], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Count all transactions
    pub fn count(&self) -> TrackerResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
    })
}
