/*!
# Database Schema Management

Schema for the SQLite key-value store and its version bookkeeping.
*/

use crate::{DbError, DbResult};
use rusqlite::{Connection, OptionalExtension};

/// Current database schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Create the `kv` and `schema_version` tables
pub fn initialize_database(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- Application state, one JSON document per key
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )
    .map_err(|e| DbError::Database(e))?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )
    .map_err(|e| DbError::Database(e))?;

    Ok(())
}

/// Check if the database has the `kv` table
pub fn check_schema(conn: &Connection) -> DbResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='kv'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| DbError::Database(e))?;

    Ok(found.is_some())
}

/// Highest schema version recorded, if any
pub fn get_schema_version(conn: &Connection) -> DbResult<Option<i32>> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| DbError::Database(e))?;

    if !table_exists {
        return Ok(None);
    }

    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, Option<i32>>(0)
    })
    .map_err(|e| DbError::Database(e))
}
