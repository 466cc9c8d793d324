//! SQLite DSN parsing and cleaning utilities.

use std::collections::HashMap;

/// SQLite-specific parameters that are lifted out of the DSN query and applied as PRAGMAs.
const SQLITE_PRAGMA_PARAMS: &[&str] = &["wal", "synchronous", "busy_timeout", "journal_mode"];

/// Split a DSN into its location part and optional query string.
pub(crate) fn split_query(dsn: &str) -> (&str, Option<&str>) {
    match dsn.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (dsn, None),
    }
}

/// Extract SQLite PRAGMA parameters from DSN and return cleaned DSN.
///
/// Whitelisted keys (`wal`, `synchronous`, `busy_timeout`, `journal_mode`) are matched
/// case-insensitively and returned with lowercase keys; any other query parameter stays
/// in the DSN. The location part is never re-encoded, so file paths with spaces or
/// non-ASCII characters survive untouched.
pub(crate) fn extract_sqlite_pragmas(dsn: &str) -> (String, HashMap<String, String>) {
    let (location, query) = split_query(dsn);
    let Some(query) = query else {
        return (dsn.to_string(), HashMap::new());
    };

    let mut extracted = HashMap::new();
    let mut remaining = Vec::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let key_lower = key.to_lowercase();
        if SQLITE_PRAGMA_PARAMS.contains(&key_lower.as_str()) {
            extracted.insert(key_lower, value.into_owned());
        } else {
            remaining.push(format!("{}={}", key, value));
        }
    }

    let clean = if remaining.is_empty() {
        location.to_string()
    } else {
        format!("{}?{}", location, remaining.join("&"))
    };

    (clean, extracted)
}

/// Check if the DSN represents an in-memory SQLite database.
///
/// Returns `true` for `sqlite::memory:`, `sqlite://memory:`, `sqlite://:memory:`
/// and DSNs carrying a `mode=memory` query parameter.
pub(crate) fn is_memory_dsn(dsn: &str) -> bool {
    let (location, query) = split_query(dsn.trim());
    if matches!(
        location.to_ascii_lowercase().as_str(),
        "sqlite::memory:" | "sqlite://memory:" | "sqlite://:memory:"
    ) {
        return true;
    }

    query.is_some_and(|q| {
        url::form_urlencoded::parse(q.as_bytes()).any(|(key, value)| {
            key.eq_ignore_ascii_case("mode") && value.eq_ignore_ascii_case("memory")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_pragmas_basic() {
        let dsn = "sqlite:///path/to/db.sqlite?wal=true&synchronous=NORMAL&other_param=value";
        let (clean_dsn, pairs) = extract_sqlite_pragmas(dsn);

        assert_eq!(clean_dsn, "sqlite:///path/to/db.sqlite?other_param=value");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get("wal"), Some(&"true".to_string()));
        assert_eq!(pairs.get("synchronous"), Some(&"NORMAL".to_string()));
    }

    #[test]
    fn test_extract_sqlite_pragmas_case_insensitive() {
        let dsn = "sqlite:///test.db?WAL=true&SYNCHRONOUS=normal&Journal_Mode=wal";
        let (clean_dsn, pairs) = extract_sqlite_pragmas(dsn);

        assert_eq!(clean_dsn, "sqlite:///test.db");
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get("journal_mode"), Some(&"wal".to_string()));
    }

    #[test]
    fn test_extract_keeps_path_verbatim() {
        let dsn = "sqlite:///home/me/My Contacts/book.db?busy_timeout=100";
        let (clean_dsn, pairs) = extract_sqlite_pragmas(dsn);

        assert_eq!(clean_dsn, "sqlite:///home/me/My Contacts/book.db");
        assert_eq!(pairs.get("busy_timeout"), Some(&"100".to_string()));
    }

    #[test]
    fn test_extract_without_query() {
        let (clean_dsn, pairs) = extract_sqlite_pragmas("sqlite://contacts.db");
        assert_eq!(clean_dsn, "sqlite://contacts.db");
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_is_memory_dsn() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite:///test.db?mode=memory"));
        assert!(is_memory_dsn("sqlite:///test.db?MODE=Memory"));

        assert!(!is_memory_dsn("sqlite:///test.db"));
        assert!(!is_memory_dsn("sqlite:///test.db?mode=rwc"));
        assert!(!is_memory_dsn("sqlite://contacts.db"));
    }
}
