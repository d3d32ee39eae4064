//! Error response DTO.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, ErrorKind};

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "User with id 7 was not found",
    "request_id": "0b7c2f0e-5d1a-4a38-9a51-1f3f4c2b9d11"
}))]
pub struct ErrorResponse {
    /// Machine-readable error kind
    pub code: String,
    /// Human-readable failure message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            request_id: None,
        }
    }

    /// Adds the request id for log correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let kind = error.kind();
        // Internal failures keep their details in the logs.
        let message = match kind {
            ErrorKind::Internal => "An internal error occurred".to_string(),
            _ => error.to_string(),
        };
        Self::new(kind.code(), &message)
    }
}
