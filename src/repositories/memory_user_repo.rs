//! In-process user repository backed by an ordered map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{NewUser, User};
use crate::repositories::{UserRepository, ensure_matching_id};

#[derive(Debug)]
struct MemoryStore {
    rows: BTreeMap<i32, User>,
    /// Next identity value; never reused, like a SERIAL column
    next_id: i32,
}

/// User repository that keeps rows in memory.
///
/// Ids start at 1 and increase monotonically, so a deleted id is never
/// handed out again.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Mutex<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(MemoryStore {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, MemoryStore>> {
        self.store.lock().map_err(|e| {
            RepositoryError::unavailable(anyhow::Error::msg(format!(
                "In-memory store is poisoned: {}",
                e
            )))
        })
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let store = self.lock()?;
        Ok(store.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> RepositoryResult<User> {
        let store = self.lock()?;
        store
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(id))
    }

    async fn add(&self, new_user: NewUser) -> RepositoryResult<User> {
        let mut store = self.lock()?;
        let id = store.next_id;
        store.next_id = id.checked_add(1).ok_or_else(|| RepositoryError::Storage {
            operation: "insert user".to_string(),
            source: anyhow::Error::msg("Identity sequence exhausted"),
        })?;

        let user = new_user.with_id(id);
        store.rows.insert(id, user.clone());
        tracing::debug!(user_id = id, "Inserted user");
        Ok(user)
    }

    async fn update(&self, id: i32, user: User) -> RepositoryResult<()> {
        ensure_matching_id(id, &user)?;
        let mut store = self.lock()?;

        match store.rows.get_mut(&id) {
            Some(row) => {
                *row = user;
                tracing::debug!(user_id = id, "Updated user");
                Ok(())
            }
            None => Err(RepositoryError::not_found(id)),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let mut store = self.lock()?;
        let removed = store.rows.remove(&id).is_some();
        tracing::debug!(user_id = id, deleted = removed, "Deleted user");
        Ok(removed)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.lock().map(|_| ())
    }
}
