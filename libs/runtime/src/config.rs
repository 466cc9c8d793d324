use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::paths::home_dir::resolve_home_dir;

/// Environment prefix for overrides, e.g. `CONTACTS__DATABASE__URL`.
pub const ENV_PREFIX: &str = "CONTACTS__";

/// In-memory SQLite DSN used by `--in-memory`.
pub const MEMORY_DSN: &str = "sqlite::memory:";

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Process-wide settings.
    pub app: AppSection,
    /// Storage location and connection knobs (optional, defaults applied when absent).
    pub database: Option<DatabaseConfig>,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Settings of the contacts module itself; opaque to the runtime.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub contacts: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default)]
    pub home_dir: String, // will be normalized to absolute path
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite DSN (e.g. "sqlite://contacts.db", "sqlite:///abs/path.db", "sqlite::memory:").
    pub url: String,
    /// Maximum number of pooled connections (optional, defaults to 1).
    pub max_conns: Option<u32>,
    /// SQLite busy timeout in milliseconds (optional, defaults to 5000).
    pub busy_timeout_ms: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://contacts.db".to_string(),
            max_conns: Some(1),
            busy_timeout_ms: Some(5000),
        }
    }
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    pub file: String,          // "logs/contacts.log"
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>, // How many rotated files to keep
    #[serde(default)]
    pub max_size_mb: Option<u64>, // Max size of the file in MB
}

/// Create a default logging configuration.
///
/// Console output is off: the terminal belongs to the UI while it runs.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "off".to_string(),
            file: "logs/contacts.log".to_string(),
            file_level: "info".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(10),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // Empty home_dir => platform default resolved by resolve_home_dir():
            // Windows: %APPDATA%/.contacts
            // Unix/macOS: $HOME/.contacts
            app: AppSection::default(),
            database: Some(DatabaseConfig::default()),
            logging: Some(default_logging_config()),
            contacts: serde_json::Value::Null,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `app.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Optional sections stay None unless provided by YAML/ENV.
        let base = AppConfig {
            app: AppSection::default(),
            database: None,
            logging: None,
            contacts: serde_json::Value::Null,
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(path))
            // CONTACTS__DATABASE__URL=... maps to database.url
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        normalize_home_dir_inplace(&mut config.app).context("Failed to resolve app.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults (environment still applies).
    /// Also normalizes `app.home_dir` into an absolute path and creates the directory.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                use figment::{
                    providers::{Env, Serialized},
                    Figment,
                };

                let mut c: AppConfig = Figment::new()
                    .merge(Serialized::defaults(Self::default()))
                    .merge(Env::prefixed(ENV_PREFIX).split("__"))
                    .extract()
                    .context("Failed to load default config")?;
                normalize_home_dir_inplace(&mut c.app)
                    .context("Failed to resolve app.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Effective database settings (section defaults when absent).
    pub fn database_or_default(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }

    /// Home directory as a path. Only meaningful after loading.
    pub fn home_dir(&self) -> PathBuf {
        PathBuf::from(&self.app.home_dir)
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.in_memory {
            self.database.get_or_insert_with(DatabaseConfig::default).url = MEMORY_DSN.to_string();
        } else if let Some(db) = &args.db {
            self.database.get_or_insert_with(DatabaseConfig::default).url = sqlite_dsn_for(db);
        }

        // Verbosity raises the file level of the "default" section; the console stays
        // untouched because the UI draws on it.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.file_level = match args.verbose {
                0 => default_section.file_level.clone(), // keep
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }
}

/// Turn a plain file path into a SQLite DSN; DSNs are passed through.
/// Relative file paths given on the command line are taken from the working directory.
fn sqlite_dsn_for(path: &str) -> String {
    if path.starts_with("sqlite:") {
        return path.to_string();
    }
    let p = Path::new(path);
    let p = if p.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(p))
            .unwrap_or_else(|_| p.to_path_buf())
    } else {
        p.to_path_buf()
    };
    format!("sqlite://{}", p.to_string_lossy().replace('\\', "/"))
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub db: Option<String>,
    pub print_config: bool,
    pub verbose: u8,
    pub in_memory: bool,
}

const fn default_subdir() -> &'static str {
    ".contacts"
}

/// Normalize `app.home_dir` using `resolve_home_dir` and store the absolute path back.
fn normalize_home_dir_inplace(app: &mut AppSection) -> Result<()> {
    // Treat empty string as "not provided" => None.
    let opt = if app.home_dir.trim().is_empty() {
        None
    } else {
        Some(app.home_dir.clone())
    };

    let resolved: PathBuf = resolve_home_dir(opt, default_subdir(), /*create*/ true)
        .context("home_dir normalization failed")?;

    app.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}
