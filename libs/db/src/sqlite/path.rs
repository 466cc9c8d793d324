//! SQLite path handling: resolving file DSNs and preparing their directories.

use std::io;
use std::path::{Path, PathBuf};

use super::dsn::{is_memory_dsn, split_query};
use crate::{DbError, Result};

/// Strip the scheme from a SQLite DSN: `sqlite://x` and `sqlite:x` both yield `x`.
fn strip_scheme(dsn: &str) -> Option<&str> {
    dsn.strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
}

/// Extract the database file path from a (pragma-free) SQLite DSN.
///
/// - `sqlite:///absolute/path/to/db.sqlite` → `/absolute/path/to/db.sqlite`
/// - `sqlite://relative/db.sqlite` and `sqlite:relative/db.sqlite` → `relative/db.sqlite`
///
/// Returns `None` for in-memory DSNs, non-SQLite DSNs and empty paths.
pub(crate) fn sqlite_file_path(dsn: &str) -> Option<PathBuf> {
    if is_memory_dsn(dsn) {
        return None;
    }
    let (location, _) = split_query(dsn);
    let path = strip_scheme(location)?;
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the parent directory of a SQLite file exists when `create_dirs` is set.
pub(crate) fn prepare_sqlite_path(path: &Path, create_dirs: bool) -> io::Result<()> {
    if !create_dirs {
        return Ok(());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Expand a SQLite DSN into an absolute-path DSN using a base directory.
/// - In-memory DSNs are normalized to `sqlite::memory:`.
/// - Relative file paths are joined onto `base_dir`.
/// - Backslashes become forward slashes (important on Windows).
/// - The query string (PRAGMA parameters) is preserved.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    let dsn = dsn.trim();
    if is_memory_dsn(dsn) {
        return Ok("sqlite::memory:".to_string());
    }

    let (location, query) = split_query(dsn);
    let path_str = strip_scheme(location).ok_or_else(|| DbError::UnknownDsn(dsn.to_string()))?;
    if path_str.is_empty() {
        return Err(DbError::InvalidPath(format!("empty SQLite path in DSN '{dsn}'")));
    }

    let mut p = PathBuf::from(path_str);
    if p.is_relative() {
        p = base_dir.join(p);
    }
    prepare_sqlite_path(&p, create_dirs)?;

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path("sqlite:///absolute/path/to/db.sqlite"),
            Some(PathBuf::from("/absolute/path/to/db.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite://relative/db.sqlite"),
            Some(PathBuf::from("relative/db.sqlite"))
        );
        assert_eq!(sqlite_file_path("sqlite:test.db"), Some(PathBuf::from("test.db")));
        assert_eq!(
            sqlite_file_path("sqlite:///path/db.sqlite?cache=shared"),
            Some(PathBuf::from("/path/db.sqlite"))
        );

        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite:///test.db?mode=memory"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
        assert_eq!(sqlite_file_path("sqlite://"), None);
    }

    #[test]
    fn test_absolutize_relative_dsn() {
        let tmp = tempdir().unwrap();
        let dsn = absolutize_sqlite_dsn("sqlite://data/contacts.db", tmp.path(), true).unwrap();

        let expected = tmp.path().join("data").join("contacts.db");
        assert_eq!(
            dsn,
            format!("sqlite://{}", expected.to_string_lossy().replace('\\', "/"))
        );
        assert!(tmp.path().join("data").is_dir(), "parent dir must be created");
    }

    #[test]
    fn test_absolutize_keeps_absolute_and_query() {
        let tmp = tempdir().unwrap();
        let abs = tmp.path().join("book.db");
        let abs_str = abs.to_string_lossy().replace('\\', "/");
        let input = format!("sqlite://{abs_str}?journal_mode=DELETE");

        let dsn = absolutize_sqlite_dsn(&input, Path::new("/ignored"), false).unwrap();

        assert_eq!(dsn, input);
    }

    #[test]
    fn test_absolutize_memory() {
        let dsn = absolutize_sqlite_dsn("sqlite://:memory:", Path::new("/base"), true).unwrap();
        assert_eq!(dsn, "sqlite::memory:");
    }

    #[test]
    fn test_absolutize_rejects_foreign_scheme() {
        let err = absolutize_sqlite_dsn("postgres://u@h/db", Path::new("/base"), false).unwrap_err();
        assert!(matches!(err, DbError::UnknownDsn(_)));
    }

    #[test]
    fn test_prepare_sqlite_path_creates_parent() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("a").join("b").join("db.sqlite");

        prepare_sqlite_path(&file, false).unwrap();
        assert!(!tmp.path().join("a").exists());

        prepare_sqlite_path(&file, true).unwrap();
        assert!(tmp.path().join("a").join("b").is_dir());
    }
}
