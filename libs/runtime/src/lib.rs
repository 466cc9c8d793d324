//! Process-level plumbing shared by the contacts binary: layered configuration,
//! logging setup and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, AppSection, CliArgs, DatabaseConfig, LoggingConfig,
    Section,
};
