//! Audit logging for budget-tracker
//!
//! Every create, update and delete of a transaction or budget is appended to
//! a line-delimited JSON log (`audit.log`) with before/after values.
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! logger.log(&AuditEntry::created(EntityType::Transaction, "42", &txn))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
