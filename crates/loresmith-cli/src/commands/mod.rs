//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use loresmith_core::error::AppError;

/// LoreSmith — Document Management Service
#[derive(Debug, Parser)]
#[command(name = "loresmith", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects config/<env>.toml overlay)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the LoreSmith server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Populate the sample document when the database is empty
    Seed,
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
            Commands::Seed => seed::execute(&self.env).await,
            Commands::Config(args) => config::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for the selected environment
pub fn load_config(env: &str) -> Result<loresmith_core::config::AppConfig, AppError> {
    loresmith_core::config::AppConfig::load(env)
}

/// Helper: create a database pool from config
pub async fn create_db_pool(
    config: &loresmith_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = loresmith_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
