//! SQLite database access crate providing a `DbHandle`.
//!
//! The handle owns one sqlx SQLite pool and a SeaORM `DatabaseConnection`
//! built on top of it, so repositories can use SeaORM while low-level code can
//! still reach the raw pool.
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> db::Result<()> {
//!     use db::{DbHandle, ConnectOpts};
//!
//!     let db = DbHandle::connect("sqlite://contacts.db", ConnectOpts::default()).await?;
//!
//!     // sqlx
//!     sqlx::query::<sqlx::Sqlite>("select 1").execute(db.sqlx_sqlite()).await?;
//!
//!     // sea-orm
//!     use sea_orm::{ConnectionTrait, Statement, DatabaseBackend};
//!     db.sea().execute(Statement::from_string(DatabaseBackend::Sqlite, "SELECT 2")).await?;
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod sqlite;

pub use sqlite::absolutize_sqlite_dsn;

use std::str::FromStr;
use std::time::Duration;

use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use sqlite::{extract_sqlite_pragmas, is_memory_dsn, prepare_sqlite_path, sqlite_file_path, Pragmas};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Invalid SQLite path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool. Ignored for in-memory databases.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Busy timeout used when the DSN carries no `busy_timeout` parameter.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(1),
            acquire_timeout: Some(Duration::from_secs(30)),
            sqlite_busy_timeout: Some(Duration::from_millis(5_000)),
            create_sqlite_dirs: true,
        }
    }
}

/// Main handle.
pub struct DbHandle {
    pool: SqlitePool,
    dsn: String,
    in_memory: bool,
    sea: DatabaseConnection,
}

impl DbHandle {
    /// Connect and build handle.
    ///
    /// Accepted forms: `sqlite::memory:`, `sqlite://relative.db`,
    /// `sqlite:///absolute.db`, each optionally followed by PRAGMA query
    /// parameters (`journal_mode`, `wal`, `synchronous`, `busy_timeout`).
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let dsn = dsn.trim();
        if !dsn.starts_with("sqlite:") {
            return Err(DbError::UnknownDsn(dsn.to_string()));
        }

        let (clean_dsn, pairs) = extract_sqlite_pragmas(dsn);
        let pragmas = Pragmas::from_pairs(&pairs);
        let in_memory = is_memory_dsn(&clean_dsn);

        let base = if in_memory {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            let path = sqlite_file_path(&clean_dsn)
                .ok_or_else(|| DbError::InvalidPath(format!("no file path in DSN '{dsn}'")))?;
            prepare_sqlite_path(&path, opts.create_sqlite_dirs)?;
            SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true)
        };
        let connect_opts = pragmas.apply(base, in_memory, opts.sqlite_busy_timeout);

        let mut o = SqlitePoolOptions::new();
        if in_memory {
            // Every new connection would see its own empty database.
            o = o
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else if let Some(n) = opts.max_conns {
            o = o.max_connections(n);
        }
        if let Some(t) = opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }

        let pool = o.connect_with(connect_opts).await?;
        let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());

        tracing::debug!(dsn = %clean_dsn, in_memory, "SQLite pool connected");

        Ok(Self {
            pool,
            dsn: clean_dsn,
            in_memory,
            sea,
        })
    }

    /// Graceful pool close. (Dropping the pool also closes it; this just makes it explicit.)
    pub async fn close(self) {
        self.pool.close().await;
    }

    /// The DSN this handle was opened with, PRAGMA parameters removed.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn is_memory(&self) -> bool {
        self.in_memory
    }

    /// Round-trip a trivial query through the pool.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // --- sqlx accessor ---
    pub fn sqlx_sqlite(&self) -> &SqlitePool {
        &self.pool
    }

    // --- SeaORM accessor ---
    /// Get SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_memory_connection() -> Result<()> {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
        assert!(db.is_memory());
        db.ping().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_database_survives_across_statements() -> Result<()> {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
        let pool = db.sqlx_sqlite();

        sqlx::query("CREATE TABLE t (v INTEGER)").execute(pool).await?;
        sqlx::query("INSERT INTO t (v) VALUES (7)").execute(pool).await?;
        let (v,): (i64,) = sqlx::query_as("SELECT v FROM t").fetch_one(pool).await?;

        assert_eq!(v, 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_non_sqlite_dsn() {
        let err = DbHandle::connect("postgres://localhost/test", ConnectOpts::default())
            .await
            .err()
            .expect("non-sqlite DSN must be rejected");
        assert!(matches!(err, DbError::UnknownDsn(_)));
    }

    #[tokio::test]
    async fn test_rejects_empty_path() {
        let err = DbHandle::connect("sqlite://", ConnectOpts::default())
            .await
            .err()
            .expect("empty path must be rejected");
        assert!(matches!(err, DbError::InvalidPath(_)));
    }

    #[tokio::test]
    async fn test_seaorm_connection() -> Result<()> {
        use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
        db.sea()
            .execute(Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1"))
            .await?;
        Ok(())
    }
}
