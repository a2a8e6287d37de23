//! Schema setup and migrations
//!
//! The schema version is tracked in SQLite's `user_version` pragma. Every
//! step uses "if not exists" semantics so opening an existing database is
//! always safe.

use rusqlite::Connection;

use crate::error::TrackerResult;

/// Current schema version
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY,
        user_id INTEGER,
        type TEXT,
        amount REAL,
        category TEXT,
        date TEXT
    );
    CREATE TABLE IF NOT EXISTS budgets (
        id INTEGER PRIMARY KEY,
        user_id INTEGER,
        category TEXT,
        budget REAL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_category
        ON transactions(user_id, category);
";

// Databases written before the unique index may hold several rows per
// (user_id, category); the newest one wins.
const ENFORCE_UNIQUE_BUDGETS: &str = "
    DELETE FROM budgets
     WHERE id NOT IN (SELECT MAX(id) FROM budgets GROUP BY user_id, category);
    CREATE UNIQUE INDEX IF NOT EXISTS idx_budgets_user_category
        ON budgets(user_id, category);
";

/// Read the schema version stored in the database
pub fn schema_version(conn: &Connection) -> TrackerResult<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Create tables and bring an existing database up to `SCHEMA_VERSION`
pub fn initialize(conn: &mut Connection) -> TrackerResult<()> {
    let current = schema_version(conn)?;

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_TABLES)?;

    if current < 2 {
        tx.execute_batch(ENFORCE_UNIQUE_BUDGETS)?;
    }

    if current < SCHEMA_VERSION {
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tracing::debug!(from = current, to = SCHEMA_VERSION, "migrated schema");
    }

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_initialize_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        initialize(&mut conn).unwrap();

        assert!(table_exists(&conn, "transactions"));
        assert!(table_exists(&conn, "budgets"));
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        initialize(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO transactions (user_id, type, amount, category, date)
             VALUES (1, 'income', 10.0, 'salary', '2024-01-01')",
            [],
        )
        .unwrap();

        initialize(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_legacy_duplicate_budgets_collapse_to_newest() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE budgets (id INTEGER PRIMARY KEY, user_id INTEGER, category TEXT, budget REAL);
             INSERT INTO budgets (user_id, category, budget) VALUES (1, 'groceries', 300.0);
             INSERT INTO budgets (user_id, category, budget) VALUES (1, 'groceries', 500.0);
             INSERT INTO budgets (user_id, category, budget) VALUES (2, 'groceries', 50.0);",
        )
        .unwrap();

        initialize(&mut conn).unwrap();

        let rows: Vec<(i64, f64)> = conn
            .prepare("SELECT user_id, budget FROM budgets ORDER BY user_id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows, vec![(1, 500.0), (2, 50.0)]);

        let dup = conn.execute(
            "INSERT INTO budgets (user_id, category, budget) VALUES (1, 'groceries', 1.0)",
            [],
        );
        assert!(dup.is_err());
    }
}
