// src/storage/mod.rs — Storage manager

pub mod schema;
pub mod store;

use rusqlite::Connection;
use std::path::Path;

/// Opens the SQLite database and applies migrations.
pub struct StorageManager {
    pub store: store::Store,
}

impl StorageManager {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)?;
        // WAL mode for concurrent readers alongside the writer
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        schema::run_migrations(&conn)?;

        Ok(Self {
            store: store::Store::new(conn),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::run_migrations(&conn)?;
        Ok(Self {
            store: store::Store::new(conn),
        })
    }
}
