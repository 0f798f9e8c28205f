use super::migrations::init_with_migrations;
use anyhow::Result;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "tasklane.db";

/// Shared storage handle.
///
/// One SQLite connection behind a mutex. Cloning is cheap and every clone
/// talks to the same connection, so the handle is built once at startup and
/// passed into each service.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens (or creates) the database at `path` and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// A private in-memory database, mostly for tests.
    pub fn in_memory() -> Result<Db> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Opens a raw connection without touching the schema.
    pub fn new_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Db> {
        Self::configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    /// Locks the connection for the duration of one unit of work.
    pub fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}
