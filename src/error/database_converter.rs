use crate::error::RepositoryError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::PoolError;

/// Utility for converting storage driver errors to RepositoryError variants.
///
/// Connectivity problems become `StorageUnavailable`; anything the database
/// itself rejected becomes `Storage` with the failed operation attached.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate RepositoryError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> RepositoryError {
        match error {
            // Transport failures without a SQLSTATE arrive as UnableToSendCommand
            DieselError::DatabaseError(
                DatabaseErrorKind::UnableToSendCommand | DatabaseErrorKind::ClosedConnection,
                info,
            ) => {
                RepositoryError::unavailable(anyhow::Error::msg(format!(
                    "Connection lost during {}: {}",
                    operation,
                    info.message()
                )))
            }
            DieselError::DatabaseError(kind, info) => RepositoryError::Storage {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "{}: {}",
                    Self::kind_label(&kind),
                    info.message()
                )),
            },
            DieselError::NotFound => RepositoryError::Storage {
                operation: operation.to_string(),
                source: anyhow::Error::msg("Query returned no rows"),
            },
            other => RepositoryError::Storage {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Converts a failed pool checkout into `StorageUnavailable`.
    pub fn convert_pool_error(error: bb8::RunError<PoolError>) -> RepositoryError {
        match error {
            bb8::RunError::TimedOut => RepositoryError::unavailable(anyhow::Error::msg(
                "Timed out waiting for a database connection",
            )),
            bb8::RunError::User(inner) => RepositoryError::unavailable(anyhow::Error::new(inner)),
        }
    }

    fn kind_label(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::SerializationFailure => "Serialization failure",
            DatabaseErrorKind::ReadOnlyTransaction => "Read only transaction",
            _ => "Database error",
        }
    }
}

impl From<bb8::RunError<PoolError>> for RepositoryError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        DatabaseErrorConverter::convert_pool_error(error)
    }
}
