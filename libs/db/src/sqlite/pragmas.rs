//! SQLite PRAGMA parameter handling with typed enums.

use std::collections::HashMap;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

/// SQLite journal mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalMode {
    Delete,
    Wal,
    Memory,
    Truncate,
    Persist,
    Off,
}

impl JournalMode {
    /// Parse from string (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DELETE" => Some(JournalMode::Delete),
            "WAL" => Some(JournalMode::Wal),
            "MEMORY" => Some(JournalMode::Memory),
            "TRUNCATE" => Some(JournalMode::Truncate),
            "PERSIST" => Some(JournalMode::Persist),
            "OFF" => Some(JournalMode::Off),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteJournalMode {
        match self {
            JournalMode::Delete => SqliteJournalMode::Delete,
            JournalMode::Wal => SqliteJournalMode::Wal,
            JournalMode::Memory => SqliteJournalMode::Memory,
            JournalMode::Truncate => SqliteJournalMode::Truncate,
            JournalMode::Persist => SqliteJournalMode::Persist,
            JournalMode::Off => SqliteJournalMode::Off,
        }
    }
}

/// SQLite synchronous mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncMode {
    Off,
    Normal,
    Full,
    Extra,
}

impl SyncMode {
    /// Parse from string (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OFF" => Some(SyncMode::Off),
            "NORMAL" => Some(SyncMode::Normal),
            "FULL" => Some(SyncMode::Full),
            "EXTRA" => Some(SyncMode::Extra),
            _ => None,
        }
    }

    fn to_sqlx(self) -> SqliteSynchronous {
        match self {
            SyncMode::Off => SqliteSynchronous::Off,
            SyncMode::Normal => SqliteSynchronous::Normal,
            SyncMode::Full => SqliteSynchronous::Full,
            SyncMode::Extra => SqliteSynchronous::Extra,
        }
    }
}

/// Parsed SQLite PRAGMA parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SyncMode>,
    pub busy_timeout_ms: Option<u64>,
    /// Legacy `wal=true|false|1|0` toggle; `journal_mode` wins when both are set.
    pub wal_toggle: Option<bool>,
}

impl Pragmas {
    /// Parse PRAGMA parameters from a key-value map. Invalid values are logged and ignored.
    pub(crate) fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let mut pragmas = Pragmas::default();

        for (key, value) in pairs {
            match key.to_lowercase().as_str() {
                "journal_mode" => match JournalMode::parse(value) {
                    Some(mode) => pragmas.journal_mode = Some(mode),
                    None => tracing::warn!("Invalid 'journal_mode' PRAGMA value '{}', ignoring", value),
                },
                "synchronous" => match SyncMode::parse(value) {
                    Some(mode) => pragmas.synchronous = Some(mode),
                    None => tracing::warn!("Invalid 'synchronous' PRAGMA value '{}', ignoring", value),
                },
                "busy_timeout" => match value.parse::<u64>() {
                    Ok(timeout) => pragmas.busy_timeout_ms = Some(timeout),
                    Err(_) => {
                        tracing::warn!("Invalid 'busy_timeout' PRAGMA value '{}', ignoring", value)
                    }
                },
                "wal" => match value.to_lowercase().as_str() {
                    "true" | "1" => pragmas.wal_toggle = Some(true),
                    "false" | "0" => pragmas.wal_toggle = Some(false),
                    _ => tracing::warn!("Invalid 'wal' PRAGMA value '{}', ignoring", value),
                },
                _ => tracing::debug!("Unknown SQLite PRAGMA parameter: {}", key),
            }
        }

        pragmas
    }

    /// Effective journal mode: explicit value, then the `wal` toggle, then the default
    /// for the database kind (WAL for files, DELETE for in-memory databases).
    pub(crate) fn effective_journal_mode(&self, in_memory: bool) -> JournalMode {
        if let Some(mode) = self.journal_mode {
            return mode;
        }
        match self.wal_toggle {
            Some(true) => JournalMode::Wal,
            Some(false) => JournalMode::Delete,
            None if in_memory => JournalMode::Delete,
            None => JournalMode::Wal,
        }
    }

    /// Apply the pragmas to typed connect options.
    ///
    /// `fallback_busy_timeout` is used when the DSN carries no `busy_timeout`.
    pub(crate) fn apply(
        &self,
        opts: SqliteConnectOptions,
        in_memory: bool,
        fallback_busy_timeout: Option<Duration>,
    ) -> SqliteConnectOptions {
        let mut opts = opts
            .journal_mode(self.effective_journal_mode(in_memory).to_sqlx())
            .synchronous(self.synchronous.unwrap_or(SyncMode::Normal).to_sqlx());

        let busy = self
            .busy_timeout_ms
            .map(Duration::from_millis)
            .or(fallback_busy_timeout);
        if let (Some(timeout), false) = (busy, in_memory) {
            opts = opts.busy_timeout(timeout);
        }
        opts
    }
}
