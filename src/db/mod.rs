mod author_repository;
mod book_repository;
mod models;

use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tracing::debug;

pub use author_repository::*;
pub use book_repository::*;
pub use models::*;

/// Default page size for list queries
pub const DEFAULT_LIMIT: i64 = 10;

/// Bootstrap DDL for a fresh database file. Idempotent.
///
/// `books.author_id` declares its reference but SQLite leaves foreign keys
/// unenforced unless `PRAGMA foreign_keys = ON` is issued per connection,
/// so dangling author ids are accepted.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS authors (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    bio   TEXT
);

CREATE TABLE IF NOT EXISTS books (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id    INTEGER NOT NULL REFERENCES authors(id),
    title        TEXT NOT NULL,
    description  TEXT
);

CREATE INDEX IF NOT EXISTS books_author_id_idx ON books(author_id);
";

/// How long a connection waits on a locked database before giving up with `SQLITE_BUSY`
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Applies per-connection pragmas as r2d2 opens each connection.
/// Concurrent writers queue on the database lock instead of failing immediately.
#[derive(Debug)]
struct SqliteSettings {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteSettings {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    pub fn new(db_path: &str, pool_size: u32) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(SqliteSettings {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }))
            .build(manager)?;

        Ok(Database {
            pool: Arc::new(pool),
        })
    }

    /// Checks out a connection for the duration of one request.
    /// It goes back to the pool when dropped.
    pub fn get_conn(&self) -> Result<DbConnection, Error> {
        Ok(self.pool.get()?)
    }

    /// Creates the `authors` and `books` tables if they are missing
    pub fn init_schema(&self) -> Result<(), Error> {
        let mut conn = self.get_conn()?;
        conn.batch_execute(SCHEMA)?;
        debug!("Database schema ready");
        Ok(())
    }
}
