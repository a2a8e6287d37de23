//! Transaction service
//!
//! Validates input at the boundary, writes through the repository and
//! records each write in the audit log.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionType, UserId};
use crate::storage::Database;

/// Service for transaction management
pub struct TransactionService<'a> {
    db: &'a Database,
}

impl<'a> TransactionService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record a transaction and return its new id
    ///
    /// `date` defaults to the current UTC time.
    pub fn add_transaction(
        &self,
        user_id: UserId,
        kind: TransactionType,
        amount: f64,
        category: &str,
        date: Option<&str>,
    ) -> TrackerResult<TransactionId> {
        let mut input = NewTransaction::new(user_id, kind, amount, category.trim());
        if let Some(date) = date {
            input = input.on(date);
        }
        Ok(self.create(input)?.id)
    }

    /// Validate and store a transaction, returning the stored row
    pub fn create(&self, input: NewTransaction) -> TrackerResult<Transaction> {
        input
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.db.in_transaction(|db| {
            let txn = db.transactions().insert(&input)?;

            db.log_audit(
                &AuditEntry::created(EntityType::Transaction, txn.id.to_string(), &txn)
                    .for_user(txn.user_id.get())
                    .with_summary(format!("{} {:.2} ({})", txn.kind, txn.amount, txn.category)),
            )?;

            Ok(txn)
        })
    }

    /// Get a transaction by id
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.db.transactions().get(id)
    }

    /// Delete a transaction. Deleting an unknown id does nothing.
    pub fn delete_transaction(&self, id: TransactionId) -> TrackerResult<()> {
        self.db.in_transaction(|db| {
            let repo = db.transactions();
            let Some(existing) = repo.get(id)? else {
                tracing::debug!(%id, "delete of unknown transaction ignored");
                return Ok(());
            };

            if repo.delete(id)? {
                db.log_audit(
                    &AuditEntry::deleted(EntityType::Transaction, id.to_string(), &existing)
                        .for_user(existing.user_id.get()),
                )?;
            }

            Ok(())
        })
    }

    /// List a user's transactions, optionally for one category
    pub fn list_transactions(
        &self,
        user_id: UserId,
        category: Option<&str>,
    ) -> TrackerResult<Vec<Transaction>> {
        self.db
            .transactions()
            .list_by_user(user_id, category.map(str::trim))
    }
}
