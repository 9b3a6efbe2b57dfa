use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, retry_with_backoff};

/// Opens a connection pool with the settings in `config`.
pub async fn connect_from_config(config: &PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.connect_options()).await?;
    info!(url = %config.redacted_url(), "Connected to PostgreSQL");
    Ok(db)
}

/// Like [`connect_from_config`], retrying with exponential backoff up to
/// `config.connect_retries` times. Used at startup when the database may
/// still be coming up.
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
) -> DatabaseResult<DatabaseConnection> {
    let retry = config.retry_config();

    retry_with_backoff(|| connect_from_config(config), &retry)
        .await
        .map_err(|e| {
            DatabaseError::ConnectionFailed(format!(
                "{} unreachable after {} attempts: {}",
                config.redacted_url(),
                retry.max_retries + 1,
                e
            ))
        })
}
