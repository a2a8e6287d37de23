//! Transaction model
//!
//! A single recorded income or expense event for a user. Transactions are
//! created and deleted but never edited in place.

use chrono::Utc;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{TransactionId, UserId};

/// Format used for the `date` column, matching SQLite's `datetime('now')`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The value stored in the `type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a string is not a known transaction type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransactionType(pub String);

impl fmt::Display for UnknownTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown transaction type '{}' (expected 'income' or 'expense')",
            self.0
        )
    }
}

impl std::error::Error for UnknownTransactionType {}

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(UnknownTransactionType(s.to_string())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A persisted transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the store on insert
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: UserId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount, non-negative
    pub amount: f64,

    /// Free-form category label
    pub category: String,

    /// Timestamp string
    pub date: String,
}

impl Transaction {
    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {:.2} ({})",
            self.id, self.date, self.kind, self.amount, self.category
        )
    }
}

/// A transaction that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    /// `None` means "now"
    pub date: Option<String>,
}

impl NewTransaction {
    /// Create a new transaction dated now
    pub fn new(
        user_id: UserId,
        kind: TransactionType,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            amount,
            category: category.into(),
            date: None,
        }
    }

    /// Set an explicit date
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The date that will be stored
    pub fn resolved_date(&self) -> String {
        self.date
            .clone()
            .unwrap_or_else(|| Utc::now().format(DATE_FORMAT).to_string())
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_finite() {
            return Err(TransactionValidationError::NonFiniteAmount);
        }

        if self.amount < 0.0 {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if matches!(&self.date, Some(d) if d.trim().is_empty()) {
            return Err(TransactionValidationError::EmptyDate);
        }

        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NegativeAmount(f64),
    NonFiniteAmount,
    EmptyCategory,
    EmptyDate,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative: {}", amount)
            }
            Self::NonFiniteAmount => write!(f, "Transaction amount must be a finite number"),
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
            Self::EmptyDate => write!(f, "Transaction date cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
