//! API module for HTTP handlers, middleware, and DTOs.
//!
//! This is the controller layer: it validates input, calls the user
//! repository once per request and renders results or errors as JSON.

pub mod doc;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
