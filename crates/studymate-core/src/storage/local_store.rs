//! SQLite-backed key-value store for persisted state slices.
//!
//! Each slice (user, study log, stamp record, ...) is stored as one JSON
//! document under a fixed key from [`super::keys`]. Reads never fail on bad
//! data: a missing, unparsable or `null` entry yields the slice default.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::{Result, StorageError};

/// Local key-value store.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open the store at `<data_dir>/studymate.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("studymate.db"))
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a raw value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key. Deleting a missing key is not an error.
    pub fn kv_remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Load a JSON slice. Missing, `null` and corrupt entries all read as `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv_get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read slice, using default");
                return None;
            }
        };
        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt slice, using default");
                None
            }
        }
    }

    /// Load a JSON slice or fall back to `default`.
    pub fn load_or_else<T: DeserializeOwned>(&self, key: &str, default: impl FnOnce() -> T) -> T {
        self.load(key).unwrap_or_else(default)
    }

    /// Load a JSON slice or its `Default`.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load(key).unwrap_or_default()
    }

    /// Serialize and store a slice.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.kv_set(key, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn kv_store() {
        let store = LocalStore::open_memory().unwrap();
        assert!(store.kv_get("test").unwrap().is_none());
        store.kv_set("test", "hello").unwrap();
        assert_eq!(store.kv_get("test").unwrap().unwrap(), "hello");
        store.kv_remove("test").unwrap();
        assert!(store.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn slices_roundtrip_through_json() {
        let store = LocalStore::open_memory().unwrap();
        let mut log = BTreeMap::new();
        log.insert("2024-06-01".to_string(), 120u64);
        store.save("study_log", &log).unwrap();
        let loaded: BTreeMap<String, u64> = store.load_or_default("study_log");
        assert_eq!(loaded, log);
    }

    #[test]
    fn corrupt_slice_falls_back_to_default() {
        let store = LocalStore::open_memory().unwrap();
        store.kv_set("todos", "{not json").unwrap();
        let todos: Vec<String> = store.load_or_else("todos", || vec!["seed".to_string()]);
        assert_eq!(todos, vec!["seed".to_string()]);
    }

    #[test]
    fn null_slice_falls_back_to_default() {
        let store = LocalStore::open_memory().unwrap();
        store.kv_set("volume", "null").unwrap();
        assert_eq!(store.load_or_else("volume", || 80u32), 80);
    }

    #[test]
    fn missing_slice_is_none() {
        let store = LocalStore::open_memory().unwrap();
        assert!(store.load::<u32>("nothing").is_none());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("studymate.db");
        {
            let store = LocalStore::open_at(&path).unwrap();
            store.save("last_login", "2024-06-01").unwrap();
        }
        let store = LocalStore::open_at(&path).unwrap();
        assert_eq!(store.load::<String>("last_login").as_deref(), Some("2024-06-01"));
    }
}
