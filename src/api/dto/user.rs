//! User request bodies.
//!
//! Responses use [`User`] directly; it already carries the public shape.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{NewUser, User};

/// Column values must stay within a single-byte encoding.
fn ascii_only(value: &str) -> Result<(), ValidationError> {
    if value.is_ascii() {
        return Ok(());
    }
    let mut error = ValidationError::new("ascii");
    error.message = Some("must contain ASCII characters only".into());
    Err(error)
}

/// Request body for creating a user; the id is assigned by the store.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "ascii_only")
    )]
    #[schema(min_length = 1, max_length = 50, example = "Ann")]
    pub first_name: String,

    #[validate(
        length(max = 50, message = "must be at most 50 characters"),
        custom(function = "ascii_only")
    )]
    #[serde(default)]
    #[schema(max_length = 50, example = "Lee")]
    pub last_name: Option<String>,

    #[validate(
        length(min = 1, max = 256, message = "must be between 1 and 256 characters"),
        email(message = "must be a valid email address")
    )]
    #[schema(format = "email", max_length = 256, example = "ann@example.com")]
    pub email: String,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Request body for replacing a user; `id` must equal the path id.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[schema(example = 1)]
    pub id: i32,

    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "ascii_only")
    )]
    #[schema(min_length = 1, max_length = 50, example = "Ann")]
    pub first_name: String,

    #[validate(
        length(max = 50, message = "must be at most 50 characters"),
        custom(function = "ascii_only")
    )]
    #[serde(default)]
    #[schema(max_length = 50, example = "Lee")]
    pub last_name: Option<String>,

    #[validate(
        length(min = 1, max = 256, message = "must be between 1 and 256 characters"),
        email(message = "must be a valid email address")
    )]
    #[schema(format = "email", max_length = 256, example = "ann@example.com")]
    pub email: String,
}

impl UpdateUserRequest {
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}
