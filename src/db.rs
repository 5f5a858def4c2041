use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

use crate::config::Config;
use crate::store::StoreError;

pub async fn init_db(config: &Config) -> Result<MySqlPool, StoreError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| StoreError::InvalidData("DATABASE_URL is not set".to_string()))?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections = config.db_max_connections, "Connected to database");
    Ok(pool)
}

/// Applies the migrations embedded from `./migrations`.
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), StoreError> {
    sqlx::migrate!().run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
