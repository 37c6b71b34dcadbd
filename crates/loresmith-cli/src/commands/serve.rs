//! Server start command.

use clap::Args;

use loresmith_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Skip running migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, env: &str) -> Result<(), AppError> {
    let mut config = super::load_config(env)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let pool = super::create_db_pool(&config).await?;

    if !args.no_migrate {
        loresmith_database::migration::run_migrations(&pool).await?;
    }

    loresmith_api::run_server(config, pool).await
}
