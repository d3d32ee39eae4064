//! Embedded schema migrations.
//!
//! diesel_migrations only speaks to synchronous connections, so each helper
//! opens a dedicated `PgConnection` on a blocking thread.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{RepositoryError, RepositoryResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn connect(database_url: &str) -> RepositoryResult<PgConnection> {
    PgConnection::establish(database_url).map_err(RepositoryError::unavailable)
}

fn migration_error(operation: &str, source: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage {
        operation: operation.to_string(),
        source: anyhow::anyhow!("Migration error: {}", source),
    }
}

async fn run_blocking<T, F>(task: F) -> RepositoryResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| RepositoryError::Storage {
            operation: "migration task".to_string(),
            source: anyhow::Error::from(e),
        })?
}

/// Names of migrations not yet applied.
pub async fn pending_migrations(database_url: String) -> RepositoryResult<Vec<String>> {
    run_blocking(move || {
        let mut conn = connect(&database_url)?;
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("check pending migrations", e))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Applies every pending migration and returns their versions.
pub async fn run_pending_migrations(database_url: String) -> RepositoryResult<Vec<String>> {
    run_blocking(move || {
        let mut conn = connect(&database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| migration_error("run pending migrations", e))?;
        Ok(applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}

/// Reverts the last `steps` migrations.
///
/// Fails without touching the schema when fewer than `steps` are applied.
pub async fn revert_migrations(database_url: String, steps: u32) -> RepositoryResult<Vec<String>> {
    run_blocking(move || {
        let mut conn = connect(&database_url)?;
        let applied = conn
            .applied_migrations()
            .map_err(|e| migration_error("list applied migrations", e))?;

        if applied.len() < steps as usize {
            return Err(RepositoryError::InvalidArgument {
                message: format!(
                    "Cannot roll back {} migration(s): only {} applied",
                    steps,
                    applied.len()
                ),
            });
        }

        let mut reverted = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| migration_error("revert migration", e))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;

    #[test]
    fn test_users_migration_is_embedded() {
        let migrations = <EmbeddedMigrations as MigrationSource<Pg>>::migrations(&MIGRATIONS).unwrap();
        assert_eq!(migrations.len(), 1);
        assert!(migrations[0].name().to_string().contains("create_users"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_storage_unavailable() {
        let result = pending_migrations("postgres://users@127.0.0.1:1/users".to_string()).await;
        assert!(matches!(
            result,
            Err(RepositoryError::StorageUnavailable { .. })
        ));
    }
}
