//! MySQL connection pool construction.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use otp_shared::config::DatabaseConfig;

use crate::InfraError;

/// Create a MySQL connection pool from configuration
///
/// # Arguments
/// * `config` - Database configuration settings
///
/// # Returns
/// * `Ok(MySqlPool)` - Connection pool ready for use
/// * `Err(InfraError)` - Connection failed
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfraError> {
    info!(
        max_connections = config.max_connections,
        "Creating MySQL connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .connect(&config.url)
        .await
        .map_err(InfraError::Database)?;

    info!("MySQL connection pool created");
    Ok(pool)
}
