//! Cloud Drive server.
//!
//! Wires configuration, logging, storage, repositories, and the HTTP API
//! together. Also carries a couple of operator commands.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use drive_auth::JwtEncoder;
use drive_core::config::AppConfig;
use drive_core::error::AppError;
use drive_database::repositories::{
    FileRepository, FolderRepository, MemoryStore, PgFileRepository, PgFolderRepository,
};
use drive_database::{DatabasePool, migration};
use drive_service::DriveService;
use drive_storage::{UrlSigner, build_provider};

#[derive(Debug, Parser)]
#[command(name = "drive-server", version, about = "Cloud Drive HTTP server")]
struct Cli {
    /// Configuration directory holding `default.toml` and `{env}.toml`.
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Environment overlay to load; falls back to `DRIVE_ENV`, then
    /// `development`.
    #[arg(long)]
    env: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve {
        /// Keep rows in process memory instead of PostgreSQL.
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply pending database migrations and exit.
    Migrate,
    /// Print a bearer token for local development.
    IssueToken {
        /// Subject user ID; random when omitted.
        #[arg(long)]
        user: Option<Uuid>,
        /// Lifetime in minutes; defaults to `auth.dev_token_ttl_minutes`.
        #[arg(long)]
        ttl_minutes: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("DRIVE_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    let config = match AppConfig::load_from(&cli.config_dir, &env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, config_dir = %cli.config_dir, "Configuration loaded");

    let result = match cli.command.unwrap_or(Command::Serve { in_memory: false }) {
        Command::Serve { in_memory } => serve(config, in_memory).await,
        Command::Migrate => migrate(&config).await,
        Command::IssueToken { user, ttl_minutes } => issue_token(&config, user, ttl_minutes),
    };

    if let Err(e) = result {
        tracing::error!(kind = %e.kind, error = %e.message, "Fatal error");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn serve(config: AppConfig, in_memory: bool) -> Result<(), AppError> {
    tracing::info!("Starting Cloud Drive v{}", env!("CARGO_PKG_VERSION"));

    let (file_repo, folder_repo): (Arc<dyn FileRepository>, Arc<dyn FolderRepository>) =
        if in_memory {
            tracing::warn!("Using in-memory repositories; rows are lost on exit");
            let (files, folders) = MemoryStore::repositories();
            (Arc::new(files), Arc::new(folders))
        } else {
            let db = DatabasePool::connect(&config.database).await?;
            migration::run_migrations(&db).await?;
            (
                Arc::new(PgFileRepository::new(db.pool().clone())),
                Arc::new(PgFolderRepository::new(db.pool().clone())),
            )
        };

    let signer = UrlSigner::new(&config.auth.jwt_secret, &config.storage.public_base_url);
    let storage = build_provider(&config.storage, signer.clone()).await?;

    let drive = DriveService::new(file_repo, folder_repo, storage, signer, &config.storage);
    let state = drive_api::AppState::new(config, drive);
    drive_api::run_server(state).await
}

async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(&db).await?;
    db.close().await;
    tracing::info!("Migrations applied");
    Ok(())
}

fn issue_token(
    config: &AppConfig,
    user: Option<Uuid>,
    ttl_minutes: Option<u64>,
) -> Result<(), AppError> {
    let user_id = user.unwrap_or_else(Uuid::new_v4);
    let ttl = ttl_minutes.unwrap_or(config.auth.dev_token_ttl_minutes);
    let (token, expires_at) = JwtEncoder::new(&config.auth).issue(user_id, ttl)?;

    println!("user:    {user_id}");
    println!("expires: {expires_at}");
    println!("token:   {token}");
    Ok(())
}
