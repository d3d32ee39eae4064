//! Middleware for request ids, logging and error rendering.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{RenderedError, error_response_middleware, status_for};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
