use crate::config::error::ConfigError;
use crate::error::RepositoryError;
use thiserror::Error;

/// Application-wide error type returned by handlers and command executors.
///
/// Repository failures are carried unchanged so their kind survives until
/// the HTTP boundary decides how to present it.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failure raised by the repository layer
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Configuration error
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// Tagged kind of an [`AppError`], independent of how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    StorageUnavailable,
    Storage,
    Validation,
    BadRequest,
    Configuration,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code used in error response bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::StorageUnavailable => "STORAGE_UNAVAILABLE",
            ErrorKind::Storage => "STORAGE_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Configuration => "CONFIGURATION_ERROR",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure originates from the backing store rather than the caller.
    pub fn is_server_side(self) -> bool {
        matches!(
            self,
            ErrorKind::StorageUnavailable
                | ErrorKind::Storage
                | ErrorKind::Configuration
                | ErrorKind::Internal
        )
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Repository(RepositoryError::NotFound { .. }) => ErrorKind::NotFound,
            AppError::Repository(RepositoryError::InvalidArgument { .. }) => {
                ErrorKind::InvalidArgument
            }
            AppError::Repository(RepositoryError::StorageUnavailable { .. }) => {
                ErrorKind::StorageUnavailable
            }
            AppError::Repository(RepositoryError::Storage { .. }) => ErrorKind::Storage,
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::BadRequest { .. } => ErrorKind::BadRequest,
            AppError::Configuration(_) => ErrorKind::Configuration,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Reports the first failing field in name order so the message is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errors)) => {
                let reason = errors
                    .first()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .unwrap_or_else(|| "invalid value".to_string());
                AppError::Validation {
                    field: field.to_string(),
                    reason,
                }
            }
            None => AppError::Validation {
                field: "body".to_string(),
                reason: errors.to_string(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(max = 2, message = "too long"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_repository_error_message_is_transparent() {
        let error = AppError::from(RepositoryError::not_found(9));
        assert_eq!(error.to_string(), "User with id 9 was not found");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(ErrorKind::NotFound.code(), "NOT_FOUND");
        assert_eq!(ErrorKind::InvalidArgument.code(), "INVALID_ARGUMENT");
        assert_eq!(ErrorKind::StorageUnavailable.code(), "STORAGE_UNAVAILABLE");
        assert_eq!(ErrorKind::Validation.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_server_side_kinds() {
        assert!(ErrorKind::StorageUnavailable.is_server_side());
        assert!(ErrorKind::Storage.is_server_side());
        assert!(!ErrorKind::NotFound.is_server_side());
        assert!(!ErrorKind::InvalidArgument.is_server_side());
    }

    #[test]
    fn test_validation_errors_pick_first_field_by_name() {
        let probe = Probe {
            name: "abc".to_string(),
            email: "nope".to_string(),
        };
        let error = AppError::from(probe.validate().unwrap_err());

        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "email");
                assert_eq!(reason, "email");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors_use_custom_message() {
        let probe = Probe {
            name: "abc".to_string(),
            email: "a@example.com".to_string(),
        };
        let error = AppError::from(probe.validate().unwrap_err());

        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert_eq!(reason, "too long");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }
}
