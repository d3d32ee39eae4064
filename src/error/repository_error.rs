use thiserror::Error;

/// Failures raised by a [`UserRepository`](crate::repositories::UserRepository).
///
/// Each variant is a distinct kind so callers can branch on the case
/// instead of inspecting messages.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No row exists for the requested id
    #[error("User with id {id} was not found")]
    NotFound { id: i32 },

    /// The caller supplied arguments that contradict each other
    #[error("{message}")]
    InvalidArgument { message: String },

    /// The store could not be reached (pool checkout failed, connection lost)
    #[error("Storage is unavailable")]
    StorageUnavailable {
        #[source]
        source: anyhow::Error,
    },

    /// The store was reached but rejected the statement
    #[error("Storage operation failed: {operation}")]
    Storage {
        operation: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RepositoryError {
    pub fn not_found(id: i32) -> Self {
        RepositoryError::NotFound { id }
    }

    /// Error for an update whose path id differs from the body id.
    pub fn id_mismatch(id: i32, entity_id: i32) -> Self {
        RepositoryError::InvalidArgument {
            message: format!(
                "The id value {} does not match the user id value {}",
                id, entity_id
            ),
        }
    }

    pub fn unavailable(source: impl Into<anyhow::Error>) -> Self {
        RepositoryError::StorageUnavailable {
            source: source.into(),
        }
    }
}

/// Type alias for repository results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
