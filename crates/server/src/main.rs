use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::database::connection::DbConnection;

pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod database;
pub(crate) mod error;
pub(crate) mod models;
pub(crate) mod server;
pub(crate) mod storage;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(about = "Care home resource library service")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the catalog tables and seed the default categories
    InitSchema,
    /// Drop the catalog tables
    DropSchema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = AppConfig::from_yaml_file(&args.config)?;
    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run_all(&config).await?,
        Command::InitSchema => {
            connect_database(&config).await?.create_all().await?;
            info!("schema created");
        }
        Command::DropSchema => {
            connect_database(&config).await?.drop_all().await?;
            info!("schema dropped");
        }
    }

    Ok(())
}

async fn connect_database(config: &AppConfig) -> anyhow::Result<DbConnection> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no `database` section in the configuration"))?;
    Ok(DbConnection::connect(database).await?)
}
