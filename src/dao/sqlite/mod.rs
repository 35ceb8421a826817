//! SQLite-backed store handle.
//!
//! [`LeagueStore`] owns the connection pool and is constructed once in `main`,
//! then carried in the shared application state. Per-entity queries live in
//! the sibling modules as inherent methods on the store.

/// Game queries.
mod games;
/// Player queries.
mod players;
/// Schema creation and teardown.
pub mod schema;
/// Stat-line queries.
mod stats;
/// Team queries.
mod teams;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;
use tracing::info;

use crate::dao::storage::{StorageError, StorageResult};

pub use stats::StatQuery;

/// Pagination and visibility filter shared by the list queries.
#[derive(Debug, Clone, Copy)]
pub struct ListFilter {
    /// Rows to skip.
    pub skip: i64,
    /// Maximum rows to return.
    pub limit: i64,
    /// When true, soft-deleted and deactivated rows are included.
    pub include_inactive: bool,
}

/// Handle over the SQLite pool; cheap to clone.
#[derive(Clone)]
pub struct LeagueStore {
    pool: SqlitePool,
}

impl LeagueStore {
    /// Open (creating if missing) the database at `url`, e.g.
    /// `sqlite://data/league.db` or `sqlite::memory:`.
    pub async fn connect(url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|err| StorageError::backend(format!("invalid database url `{url}`"), err))?
            .create_if_missing(true)
            .foreign_keys(true);

        // A shared in-memory database exists per connection, so the pool must
        // not fan out for `:memory:` URLs.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|err| StorageError::backend(format!("opening database `{url}`"), err))?;

        info!(%url, "connected to SQLite");
        Ok(Self { pool })
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query to verify the database is reachable.
    pub async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::backend("health ping failed", err))?;
        Ok(())
    }

    /// Close the pool, flushing outstanding writes.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Timestamp applied to created/updated/deleted columns.
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
