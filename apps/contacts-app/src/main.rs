use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contacts::config::ContactsConfig;
use contacts::ContactsModule;
use db::{absolutize_sqlite_dsn, ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Contacts - terminal contact manager
#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Contacts - terminal contact manager backed by SQLite")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database file (overrides config)
    #[arg(long, value_name = "PATH")]
    db: Option<String>,

    /// Use a throwaway in-memory database
    #[arg(long)]
    in_memory: bool,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// File log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the contact manager UI
    Run,
    /// Check configuration and storage, then exit
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        db: cli.db.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
        in_memory: cli.in_memory,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Initialize logging
    let logging_config = config
        .logging
        .clone()
        .unwrap_or_else(runtime::default_logging_config);
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Contacts starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_ui(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Open the database, run migrations and wire the contacts module.
async fn open_storage(config: &AppConfig) -> Result<(DbHandle, ContactsModule)> {
    let db_config = config.database_or_default();

    // Absolutize sqlite DSNs against home_dir to avoid cwd issues
    let dsn = absolutize_sqlite_dsn(db_config.url.trim(), &config.home_dir(), true)
        .with_context(|| format!("Invalid database URL '{}'", db_config.url))?;

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
    };

    tracing::info!("Opening database: {}", dsn);
    let db = DbHandle::connect(&dsn, connect_opts)
        .await
        .with_context(|| format!("Failed to open database '{dsn}'"))?;

    let module_cfg =
        ContactsConfig::from_value(&config.contacts).context("Invalid 'contacts' config section")?;
    let module = ContactsModule::init(&db, module_cfg).await?;
    Ok((db, module))
}

async fn run_ui(config: AppConfig) -> Result<()> {
    let (db, module) = open_storage(&config).await?;

    // Initial load happens before the terminal switches to raw mode
    let mut controller = module.controller();
    controller
        .refresh()
        .await
        .context("Failed to load contacts")?;

    let result = contacts::api::tui::run(controller).await;
    db.close().await;
    result
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let (db, module) = open_storage(&config).await?;
    let count = module
        .api()
        .list_contacts()
        .await
        .context("Failed to list contacts")?
        .len();
    let dsn = db.dsn().to_string();
    db.close().await;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Database: {dsn}");
    println!("Contacts: {count}");
    Ok(())
}
