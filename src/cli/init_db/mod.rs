//! Init-db command - creates the SQLite schema and exits

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::infrastructure::logging;
use crate::infrastructure::storage::SqliteDatabase;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    if config.database.backend == StorageBackend::Memory {
        warn!("Storage backend is 'memory', nothing to initialise");
        return Ok(());
    }

    info!(path = %config.database.path, "Initialising database");
    SqliteDatabase::new(&config.database.path).init_schema().await?;

    Ok(())
}
