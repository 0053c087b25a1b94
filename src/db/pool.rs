//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

/// Concurrent CLI invocations wait this long for the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn)
    }

    /// Private in-memory database (tests, dry runs).
    pub fn in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Run `func` inside `BEGIN IMMEDIATE … COMMIT`.
    ///
    /// SQLite grants the write lock to one connection at a time, so two
    /// processes transitioning the same worker are serialized. Any error rolls
    /// the whole unit back.
    pub fn serialized<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut DbPool) -> AppResult<T>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE;")?;

        match func(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT;")?;
                Ok(value)
            }
            Err(e) => {
                // the original error matters more than a failed rollback
                let _ = self.conn.execute_batch("ROLLBACK;");
                Err(e)
            }
        }
    }
}
