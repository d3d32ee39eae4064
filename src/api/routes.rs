//! Router configuration for the API.
//!
//! Centralizes route registration and middleware ordering.

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{error_response_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. CORS and compression
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - one span per request, tagged with the request id
/// 4. Error rendering - applies the error mapping to every error body
/// 5. Timeout - answers 408 when a handler exceeds `request_timeout`
///
/// # Routes
/// - `/api/users` - User CRUD operations
/// - `/health`, `/health/ready`, `/health/live` - Probes
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new().nest("/users", handlers::users::user_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn_with_state(
            state.error_mapping,
            error_response_middleware,
        ))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::api::dto::ErrorResponse;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::config::ErrorMapping;
    use crate::repositories::InMemoryUserRepository;

    fn app() -> Router {
        create_router(
            AppState::new(Arc::new(InMemoryUserRepository::new()), ErrorMapping::Collapsed),
            Duration::from_secs(30),
        )
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let response = app()
            .oneshot(Request::builder().uri("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/api/users/{id}"].is_object());
    }

    #[tokio::test]
    async fn test_wrong_method_gets_error_body() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/api/users/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(response.headers().contains_key(axum::http::header::ALLOW));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, "METHOD_NOT_ALLOWED");
        assert!(body.request_id.is_some());
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "late"
        }

        let router = Router::new()
            .route("/slow", axum::routing::get(slow))
            .layer(TimeoutLayer::new(Duration::from_millis(20)))
            .layer(middleware::from_fn_with_state(
                ErrorMapping::Collapsed,
                error_response_middleware,
            ));

        let response = router
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, "REQUEST_TIMEOUT");
    }
}
