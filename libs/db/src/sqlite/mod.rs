//! SQLite-specific helpers: DSN parsing, PRAGMA handling and path preparation.

pub(crate) mod dsn;
pub mod path;
pub(crate) mod pragmas;

pub(crate) use dsn::{extract_sqlite_pragmas, is_memory_dsn};
pub use path::absolutize_sqlite_dsn;
pub(crate) use path::{prepare_sqlite_path, sqlite_file_path};
pub(crate) use pragmas::Pragmas;
