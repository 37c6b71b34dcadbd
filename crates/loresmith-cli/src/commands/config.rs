//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output;
use loresmith_core::error::AppError;

/// Arguments for the config command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration as JSON
    Show,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(env)?;
            // Never echo credentials.
            config.database.url = mask(&config.database.url);
            config.encryption.key = if config.encryption.key.is_empty() {
                String::new()
            } else {
                "****".to_string()
            };
            output::print_json(&config);
        }
    }
    Ok(())
}

fn mask(url: &str) -> String {
    match url.split_once('@') {
        Some((_, host)) => format!("postgres://****@{host}"),
        None => url.to_string(),
    }
}
