//! Data Transfer Objects for API requests and responses.

mod error;
mod health;
mod user;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{CreateUserRequest, UpdateUserRequest};
