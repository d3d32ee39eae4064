//! Repository layer for data access operations.
//!
//! [`UserRepository`] is the only path from the HTTP layer to storage.
//! Two backends implement it: PostgreSQL through diesel_async, and an
//! in-process map used for local runs and tests.

mod memory_user_repo;
mod user_repo;

pub use memory_user_repo::InMemoryUserRepository;
pub use user_repo::DieselUserRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::settings::{DatabaseConfig, StorageBackend};
use crate::db::establish_async_connection_pool;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{NewUser, User};

/// CRUD operations over the users table.
///
/// Every method is one atomic unit against the store. Implementations must
/// reject an id mismatch in [`update`](UserRepository::update) before
/// touching storage; [`ensure_matching_id`] does exactly that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every user ordered by id. An empty table is not an error.
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;

    /// Returns the user with the given id, or `NotFound`.
    async fn get_by_id(&self, id: i32) -> RepositoryResult<User>;

    /// Persists a new user and returns it with the store-assigned id.
    async fn add(&self, new_user: NewUser) -> RepositoryResult<User>;

    /// Overwrites the stored row for `id` with the fields of `user`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `id != user.id`
    /// - `NotFound` if no row with that id exists at write time
    async fn update(&self, id: i32, user: User) -> RepositoryResult<()>;

    /// Removes the user. Returns `false` when there was nothing to remove.
    async fn delete(&self, id: i32) -> RepositoryResult<bool>;

    /// Cheap connectivity probe used by health checks.
    async fn ping(&self) -> RepositoryResult<()>;
}

/// Rejects an update whose path id and entity id disagree.
pub fn ensure_matching_id(id: i32, user: &User) -> RepositoryResult<()> {
    if id != user.id {
        return Err(RepositoryError::id_mismatch(id, user.id));
    }
    Ok(())
}

/// Builds the repository selected by `database.backend`.
///
/// # Errors
/// `StorageUnavailable` if the PostgreSQL pool cannot be created.
pub async fn build_user_repository(
    config: &DatabaseConfig,
) -> RepositoryResult<Arc<dyn UserRepository>> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = establish_async_connection_pool(config).await?;
            tracing::info!(
                max_connections = config.max_connections,
                "Using PostgreSQL user repository"
            );
            Ok(Arc::new(DieselUserRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory user repository; data is lost on shutdown");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}
