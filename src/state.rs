//! Application state for Axum web framework.
//!
//! Handlers reach storage only through the repository held here.

use std::sync::Arc;

use crate::config::ErrorMapping;
use crate::repositories::UserRepository;

/// Shared state handed to every handler.
///
/// Cloning is cheap: the repository sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Users data access, PostgreSQL or in-memory
    pub users: Arc<dyn UserRepository>,
    /// How error kinds map to HTTP statuses
    pub error_mapping: ErrorMapping,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, error_mapping: ErrorMapping) -> Self {
        Self {
            users,
            error_mapping,
        }
    }
}
