//! Tests for SQLite file handling and PRAGMA parameters.

use db::{absolutize_sqlite_dsn, ConnectOpts, DbHandle};
use tempfile::TempDir;

/// Relative DSNs are resolved against the base directory and the file is created.
#[tokio::test]
async fn test_sqlite_relative_path_resolution() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dsn = absolutize_sqlite_dsn("sqlite://nested/contacts.db", temp_dir.path(), true)?;

    let handle = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    handle.ping().await?;

    let expected_path = temp_dir.path().join("nested").join("contacts.db");
    assert!(
        expected_path.exists(),
        "Database file should be created at {:?}",
        expected_path
    );
    Ok(())
}

/// Parent directories are created by `connect` itself when requested.
#[tokio::test]
async fn test_sqlite_creates_parent_dirs() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("a").join("b").join("c.db");
    let dsn = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let handle = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    handle.close().await;

    assert!(db_path.exists(), "Database file should be created at {:?}", db_path);
    Ok(())
}

/// Data written through one handle is visible after reopening the file.
#[tokio::test]
async fn test_sqlite_file_persists_between_handles() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dsn = absolutize_sqlite_dsn("sqlite://persist.db", temp_dir.path(), true)?;

    let first = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    sqlx::query("CREATE TABLE t (v TEXT NOT NULL)")
        .execute(first.sqlx_sqlite())
        .await?;
    sqlx::query("INSERT INTO t (v) VALUES ('kept')")
        .execute(first.sqlx_sqlite())
        .await?;
    first.close().await;

    let second = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    let (v,): (String,) = sqlx::query_as("SELECT v FROM t")
        .fetch_one(second.sqlx_sqlite())
        .await?;
    assert_eq!(v, "kept");
    Ok(())
}

/// PRAGMA parameters are applied to the connection and stripped from the DSN.
#[tokio::test]
async fn test_pragmas_from_dsn_are_applied() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dsn = absolutize_sqlite_dsn(
        "sqlite://pragma.db?journal_mode=DELETE&synchronous=FULL&busy_timeout=1234",
        temp_dir.path(),
        true,
    )?;

    let handle = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    assert!(!handle.dsn().contains('?'), "PRAGMA params must be stripped");

    let pool = handle.sqlx_sqlite();
    let (journal,): (String,) = sqlx::query_as("PRAGMA journal_mode").fetch_one(pool).await?;
    assert_eq!(journal.to_lowercase(), "delete");

    let (sync,): (i64,) = sqlx::query_as("PRAGMA synchronous").fetch_one(pool).await?;
    assert_eq!(sync, 2, "FULL synchronous mode");

    let (busy,): (i64,) = sqlx::query_as("PRAGMA busy_timeout").fetch_one(pool).await?;
    assert_eq!(busy, 1234);
    Ok(())
}

/// File databases default to WAL journaling.
#[tokio::test]
async fn test_file_database_defaults_to_wal() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let dsn = absolutize_sqlite_dsn("sqlite://wal.db", temp_dir.path(), true)?;

    let handle = DbHandle::connect(&dsn, ConnectOpts::default()).await?;
    let (journal,): (String,) = sqlx::query_as("PRAGMA journal_mode")
        .fetch_one(handle.sqlx_sqlite())
        .await?;
    assert_eq!(journal.to_lowercase(), "wal");
    Ok(())
}
