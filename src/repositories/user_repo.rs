//! PostgreSQL user repository using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{DatabaseErrorConverter, RepositoryError, RepositoryResult};
use crate::models::{NewUser, User};
use crate::repositories::{UserRepository, ensure_matching_id};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
/// Each operation checks out its own connection and returns it to the pool
/// when the operation finishes, whatever the outcome.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: AsyncDbPool,
}

impl DieselUserRepository {
    /// Creates a new DieselUserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = users
            .order(id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))?;

        tracing::debug!(count = rows.len(), "Listed users");
        Ok(rows)
    }

    async fn get_by_id(&self, user_id: i32) -> RepositoryResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user"))?
            .ok_or_else(|| RepositoryError::not_found(user_id))
    }

    async fn add(&self, new_user: NewUser) -> RepositoryResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let created = diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))?;

        tracing::debug!(user_id = created.id, "Inserted user");
        Ok(created)
    }

    async fn update(&self, user_id: i32, user: User) -> RepositoryResult<()> {
        use crate::schema::users::dsl::*;
        ensure_matching_id(user_id, &user)?;
        let mut conn = self.pool.get().await?;

        // Zero affected rows means the row is gone, possibly deleted concurrently.
        let affected = diesel::update(users.find(user_id))
            .set(&user.changes())
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))?;

        if affected == 0 {
            return Err(RepositoryError::not_found(user_id));
        }

        tracing::debug!(user_id, "Updated user");
        Ok(())
    }

    async fn delete(&self, user_id: i32) -> RepositoryResult<bool> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(users.find(user_id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete user"))?;

        tracing::debug!(user_id, deleted = affected > 0, "Deleted user");
        Ok(affected > 0)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "ping"))
    }
}
