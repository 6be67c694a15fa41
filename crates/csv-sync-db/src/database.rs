/*!
# SQLite Store

[`KeyValueStore`] backed by a single SQLite file (or an in-memory database in
tests). Each key holds one JSON document.
*/

use crate::{
    schema::{check_schema, initialize_database},
    store::KeyValueStore,
    DbError, DbResult,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::InvalidConfig(format!(
                "Database file does not exist: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        let db = Self { conn };
        if !db.verify_schema()? {
            return Err(DbError::InvalidConfig(format!(
                "Database file has invalid schema: {}",
                path.display()
            )));
        }

        Ok(db)
    }

    /// Open `path`, creating the file and schema when it does not exist yet
    pub fn open_or_create(path: &Path) -> DbResult<Self> {
        if path.exists() {
            return Self::open(path);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("Failed to create database file: {}", e)))?;
        initialize_database(&conn)?;

        debug!("Created database at {}", path.display());
        Ok(Self { conn })
    }

    /// Create a new in-memory database with initialized schema
    pub fn create_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DbError::Connection(format!("Failed to create in-memory database: {}", e))
        })?;

        initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Check if database has proper schema
    pub fn verify_schema(&self) -> DbResult<bool> {
        check_schema(&self.conn)
    }

    /// Every stored key, sorted
    pub fn keys(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(|e| DbError::Database(e))?;

        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| DbError::Database(e))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| DbError::Database(e))?;

        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .map_err(|e| DbError::Database(e))
    }

    fn set(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value],
            )
            .map_err(|e| DbError::Database(e))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DbResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| DbError::Database(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_kv() {
        let mut store = SqliteStore::create_in_memory().unwrap();
        assert!(store.verify_schema().unwrap());
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        store.set("a", "x").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.keys().unwrap(), vec!["a", "k"]);

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = SqliteStore::open(&dir.path().join("missing.db"));
        assert!(matches!(result, Err(DbError::InvalidConfig(_))));
    }

    #[test]
    fn test_open_rejects_foreign_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE something (id INTEGER);")
            .unwrap();

        assert!(matches!(
            SqliteStore::open(&path),
            Err(DbError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_open_or_create_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("csv-sync.db");

        {
            let mut store = SqliteStore::open_or_create(&path).unwrap();
            store.set("k", "v").unwrap();
        }

        let store = SqliteStore::open_or_create(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
