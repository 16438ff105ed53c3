//! `SQLite` ledger implementation.
//!
//! Provides persistent fragment storage using `SQLite` with WAL journaling
//! and migration support. All operations serialize on a single
//! connection-level mutex.

// SQLite stores all integers as i64. These casts are intentional and safe
// because we only store non-negative values that fit in usize.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::UserId;
use crate::error::{Result, StorageError};
use crate::ledger::schema::{
    CHECK_SCHEMA_SQL, CURRENT_SCHEMA_VERSION, GET_VERSION_SQL, SCHEMA_SQL, SET_VERSION_SQL,
};
use crate::ledger::traits::{Ledger, LedgerStats};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// SQLite-based fragment ledger.
///
/// Holds one process-wide connection behind a mutex; every operation is a
/// single SQL statement executed under that lock, so same-user interleaving
/// can never observe a partial row. The lock serializes unrelated users
/// too; per-user sharding is not attempted.
///
/// # Examples
///
/// ```no_run
/// use condense_rs::ledger::{Ledger, SqliteLedger};
///
/// let ledger = SqliteLedger::open("sessions.db").unwrap();
/// ledger.append(1, "Hello!").unwrap();
/// ```
pub struct SqliteLedger {
    /// `SQLite` connection; `None` after shutdown.
    conn: Mutex<Option<Connection>>,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteLedger {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// The schema is created or migrated as needed; opening an
    /// already-initialized database is a no-op.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database file. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Database(e.to_string()))?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;

        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;

        // WAL mode for concurrent readers (returns a result row, use query_row)
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        let ledger = Self {
            conn: Mutex::new(Some(conn)),
            path: Some(path),
        };
        ledger.init_schema()?;
        Ok(ledger)
    }

    /// Creates an in-memory `SQLite` ledger.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;

        let ledger = Self {
            conn: Mutex::new(Some(conn)),
            path: None,
        };
        ledger.init_schema()?;
        Ok(ledger)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs a closure against the live connection.
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = guard.as_ref().ok_or(StorageError::Closed)?;
        f(conn)
    }

    /// Creates the schema and runs pending migrations. Idempotent.
    fn init_schema(&self) -> Result<()> {
        self.with_conn(|conn| {
            let is_init: i64 = conn
                .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
                .map_err(StorageError::from)?;

            if is_init == 0 {
                conn.execute_batch(SCHEMA_SQL).map_err(StorageError::from)?;
                conn.execute(SET_VERSION_SQL, params![CURRENT_SCHEMA_VERSION.to_string()])
                    .map_err(StorageError::from)?;
            } else {
                let version: Option<String> = conn
                    .query_row(GET_VERSION_SQL, [], |row| row.get(0))
                    .optional()
                    .map_err(StorageError::from)?;
                let current: u32 = version.and_then(|v| v.parse().ok()).unwrap_or(0);

                if current < CURRENT_SCHEMA_VERSION {
                    for migration in crate::ledger::schema::get_migrations_from(current) {
                        conn.execute_batch(migration.sql)
                            .map_err(|e| StorageError::Migration(e.to_string()))?;
                    }
                    conn.execute(SET_VERSION_SQL, params![CURRENT_SCHEMA_VERSION.to_string()])
                        .map_err(StorageError::from)?;
                }
            }
            Ok(())
        })
    }

    /// Returns current Unix timestamp.
    #[allow(clippy::cast_possible_wrap)]
    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

impl Ledger for SqliteLedger {
    fn append(&self, user_id: UserId, text: &str) -> Result<()> {
        if text.is_empty() {
            debug!(user_id, "ignoring empty fragment");
            return Ok(());
        }

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO fragments (user_id, text, created_at) VALUES (?, ?, ?)",
                params![user_id, text, Self::now()],
            )
            .map_err(StorageError::from)?;
            Ok(())
        })?;

        debug!(user_id, bytes = text.len(), "fragment appended");
        Ok(())
    }

    fn read_all(&self, user_id: UserId) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT text FROM fragments WHERE user_id = ? ORDER BY seq")
                .map_err(StorageError::from)?;

            let texts = stmt
                .query_map(params![user_id], |row| row.get(0))
                .map_err(StorageError::from)?
                .collect::<std::result::Result<Vec<String>, _>>()
                .map_err(StorageError::from)?;

            Ok(texts)
        })
    }

    fn exists(&self, user_id: UserId) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM fragments WHERE user_id = ? LIMIT 1",
                    params![user_id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(StorageError::from)?;
            Ok(found.is_some())
        })
    }

    fn clear(&self, user_id: UserId) -> Result<()> {
        let deleted = self.with_conn(|conn| {
            conn.execute("DELETE FROM fragments WHERE user_id = ?", params![user_id])
                .map_err(StorageError::from)
                .map_err(Into::into)
        })?;

        debug!(user_id, deleted, "session cleared");
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(conn) = guard.take() {
            conn.close()
                .map_err(|(_, e)| StorageError::Database(e.to_string()))?;
            debug!("ledger connection closed");
        }
        Ok(())
    }

    fn stats(&self) -> Result<LedgerStats> {
        let (user_count, fragment_count, total_text_size, schema_version) =
            self.with_conn(|conn| {
                let user_count: i64 = conn
                    .query_row("SELECT COUNT(DISTINCT user_id) FROM fragments", [], |row| {
                        row.get(0)
                    })
                    .map_err(StorageError::from)?;

                let fragment_count: i64 = conn
                    .query_row("SELECT COUNT(*) FROM fragments", [], |row| row.get(0))
                    .map_err(StorageError::from)?;

                let total_text_size: i64 = conn
                    .query_row(
                        "SELECT COALESCE(SUM(LENGTH(CAST(text AS BLOB))), 0) FROM fragments",
                        [],
                        |row| row.get(0),
                    )
                    .map_err(StorageError::from)?;

                let version: Option<String> = conn
                    .query_row(GET_VERSION_SQL, [], |row| row.get(0))
                    .optional()
                    .map_err(StorageError::from)?;
                let schema_version: u32 = version.and_then(|v| v.parse().ok()).unwrap_or(0);

                Ok((user_count, fragment_count, total_text_size, schema_version))
            })?;

        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        Ok(LedgerStats {
            user_count: user_count as usize,
            fragment_count: fragment_count as usize,
            total_text_size: total_text_size as usize,
            schema_version,
            db_size,
        })
    }
}
