//! Storage layer for budget-tracker
//!
//! Wraps a single SQLite connection. The `Database` handle is passed
//! explicitly to every repository and service; dropping it closes the
//! connection.

pub mod budgets;
pub mod schema;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use transactions::TransactionRepository;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};

/// How long a write waits on another process's lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the backing store
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
    audit: Option<AuditLogger>,
}

impl Database {
    /// Open (creating if absent) the database file and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::StorageUnavailable(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| unavailable(path, e))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| unavailable(path, e))?;

        let db = Self::from_connection(conn, Some(path.to_path_buf()))
            .map_err(|e| match e {
                TrackerError::Storage(msg) => TrackerError::StorageUnavailable(format!(
                    "Failed to initialize {}: {}",
                    path.display(),
                    msg
                )),
                other => other,
            })?;

        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn open_in_memory() -> TrackerResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TrackerError::StorageUnavailable(e.to_string()))?;
        Self::from_connection(conn, None)
    }

    fn from_connection(mut conn: Connection, path: Option<PathBuf>) -> TrackerResult<Self> {
        schema::initialize(&mut conn)?;
        Ok(Self {
            conn,
            path,
            audit: None,
        })
    }

    /// Record writes in an append-only audit log
    pub fn with_audit_log(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// File backing this database (`None` when in memory)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Transaction repository over this connection
    pub fn transactions(&self) -> TransactionRepository<'_> {
        TransactionRepository::new(&self.conn)
    }

    /// Budget repository over this connection
    pub fn budgets(&self) -> BudgetRepository<'_> {
        BudgetRepository::new(&self.conn)
    }

    /// The audit logger, if one is attached
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Run `f` inside one SQLite transaction
    ///
    /// The transaction commits only when `f` returns `Ok`; any error,
    /// including a failed audit append, rolls every write in `f` back.
    pub fn in_transaction<T, F>(&self, f: F) -> TrackerResult<T>
    where
        F: FnOnce(&Self) -> TrackerResult<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    /// Append an entry to the audit log, if one is attached
    pub fn log_audit(&self, entry: &AuditEntry) -> TrackerResult<()> {
        match &self.audit {
            Some(logger) => logger.log(entry),
            None => Ok(()),
        }
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> TrackerError {
    TrackerError::StorageUnavailable(format!("Failed to open {}: {}", path.display(), err))
}

/// Open the configured database, attaching the audit log when enabled
pub fn connect(paths: &TrackerPaths, audit_enabled: bool) -> TrackerResult<Database> {
    let db = Database::open(paths.database_file())?;
    if audit_enabled {
        Ok(db.with_audit_log(AuditLogger::new(paths.audit_log())))
    } else {
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, TransactionType, UserId};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_file_and_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("tracker.db");

        let db = Database::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.transactions()
                .insert(&NewTransaction::new(
                    UserId::new(1),
                    TransactionType::Income,
                    1000.0,
                    "salary",
                ))
                .unwrap()
                .id
        };

        let db = Database::open(&path).unwrap();
        assert!(db.transactions().get(id).unwrap().is_some());
    }

    #[test]
    fn test_open_directory_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();

        let err = Database::open(temp_dir.path()).err().unwrap();
        assert!(matches!(err, TrackerError::StorageUnavailable(_)));
    }

    #[test]
    fn test_in_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();

        let result: TrackerResult<()> = db.in_transaction(|db| {
            db.transactions().insert(&NewTransaction::new(
                UserId::new(1),
                TransactionType::Expense,
                10.0,
                "food",
            ))?;
            Err(TrackerError::Validation("abort".into()))
        });

        assert!(result.is_err());
        assert_eq!(db.transactions().count().unwrap(), 0);

        db.in_transaction(|db| {
            db.transactions().insert(&NewTransaction::new(
                UserId::new(1),
                TransactionType::Expense,
                10.0,
                "food",
            ))
        })
        .unwrap();
        assert_eq!(db.transactions().count().unwrap(), 1);
    }

    #[test]
    fn test_connect_attaches_audit_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let db = connect(&paths, true).unwrap();
        assert!(db.audit_logger().is_some());
        assert!(paths.database_file().exists());

        let db = connect(&paths, false).unwrap();
        assert!(db.audit_logger().is_none());
    }
}
