use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Connects to the shared profile store with a bounded retry, then brings
/// the schema up to date. Failure is reported to the caller; the server
/// starts degraded instead of crashing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let max_retries = 5;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Database connection established.");
                break pool;
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                info!(
                    "Failed to connect to database (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds
                );

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2;
            }
            Err(e) => {
                return Err(e).context("failed to connect to the profile store");
            }
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run profile store migrations")?;

    Ok(pool)
}
