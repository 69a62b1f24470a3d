//! A persistent key-value store with a byte quota, backed by a SQLite table.
//!
//! Values are opaque strings. The store mirrors the semantics of a browser's
//! local storage: `set_item` overwrites, `clear` removes every key, and writes
//! that would grow the store past its quota are rejected.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// The quota used when none is configured, 5 MiB.
pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;

/// Create the table that holds the key-value pairs.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_local_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        (),
    )?;

    Ok(())
}

/// A handle to the key-value store.
///
/// Cloning the handle is cheap, all clones share the same database connection.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    connection: Arc<Mutex<Connection>>,
    quota_bytes: usize,
}

impl LocalStorage {
    /// Create a handle that stores at most `quota_bytes` bytes of keys and values.
    ///
    /// The caller must have created the table with [create_local_storage_table].
    pub fn new(connection: Arc<Mutex<Connection>>, quota_bytes: usize) -> Self {
        Self {
            connection,
            quota_bytes,
        }
    }

    /// Get the value stored under `key`, or `None` if there is no such key.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] if the connection lock is poisoned,
    /// or an [Error::SqlError] if there is some other SQL error.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        connection
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns an [Error::StorageQuotaExceeded] if the store would hold more
    /// than its quota after the write. The existing value is left untouched.
    /// Returns an [Error::DatabaseLockError] or [Error::SqlError] on database
    /// failures.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let other_entries_bytes: i64 = connection.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM local_storage WHERE key != ?1",
            [key],
            |row| row.get(0),
        )?;
        let requested = other_entries_bytes as usize + key.len() + value.len();

        if requested > self.quota_bytes {
            return Err(Error::StorageQuotaExceeded {
                quota: self.quota_bytes,
                requested,
            });
        }

        connection.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }

    /// Remove `key` from the store. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] or [Error::SqlError] on database
    /// failures.
    pub fn remove_item(&self, key: &str) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        connection.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;

        Ok(())
    }

    /// Remove every key from the store.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] or [Error::SqlError] on database
    /// failures.
    pub fn clear(&self) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let removed = connection.execute("DELETE FROM local_storage", ())?;
        tracing::debug!("cleared {removed} keys from local storage");

        Ok(())
    }

    /// The number of keys in the store.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] or [Error::SqlError] on database
    /// failures.
    pub fn len(&self) -> Result<usize, Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let count: i64 =
            connection.query_row("SELECT COUNT(*) FROM local_storage", (), |row| row.get(0))?;

        Ok(count as usize)
    }
}
