// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Idle connections are dropped after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Connections are recycled after this long regardless of use
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Called once during application startup in main.rs.
/// The startup probe fails fast when the database is unreachable rather
/// than letting the first request discover it.
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.database_url)
        .await?;

    // Startup probe
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!(
        "Database pool ready ({} connections max)",
        config.db_max_connections
    );
    Ok(pool)
}
