//! Database setup and initialization

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;
use tubely_core::Config;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(30))
        .connect(config.database_url())
        .await
        .with_context(|| format!("Failed to connect to {}", config.database_url()))?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    tubely_db::MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
