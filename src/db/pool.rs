//! Async database connection pool.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use crate::config::settings::DatabaseConfig;
use crate::error::{RepositoryError, RepositoryResult};

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async connection pool sized from the database settings.
///
/// The pool opens `min_connections` eagerly; an unreachable server
/// therefore surfaces here as `StorageUnavailable`.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> RepositoryResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(RepositoryError::unavailable)?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool established"
    );
    Ok(pool)
}
