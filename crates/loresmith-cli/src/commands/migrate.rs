//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use loresmith_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Drop all tables and re-run migrations
    Reset {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            loresmith_database::migration::run_migrations(&pool).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Reset { force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("This will DROP all tables and re-run migrations. Continue?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            println!("Resetting database...");
            sqlx::query(
                "DROP TABLE IF EXISTS document_versions, documents, _sqlx_migrations CASCADE",
            )
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to drop tables: {e}")))?;
            sqlx::query("DROP TYPE IF EXISTS document_status")
                .execute(&pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to drop types: {e}")))?;

            loresmith_database::migration::run_migrations(&pool).await?;
            output::print_success("Database reset complete.");
        }
    }

    Ok(())
}
