//! Error rendering for HTTP responses.
//!
//! `AppError` renders itself with the collapsed 400 status and leaves a
//! [`RenderedError`] in the response extensions. The
//! [`error_response_middleware`] then applies the configured
//! [`ErrorMapping`], attaches the request id, and logs the failure.
//! Error responses produced outside handlers (unknown route, wrong method,
//! timeout) are rewritten into the same `ErrorResponse` shape.

use axum::{
    Json,
    extract::{
        Request, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::api::middleware::RequestId;
use crate::config::ErrorMapping;
use crate::error::{AppError, ErrorKind};

/// Error details carried from `AppError::into_response` to the middleware.
#[derive(Debug, Clone)]
pub struct RenderedError {
    pub kind: ErrorKind,
    pub body: ErrorResponse,
    /// Full source chain, for logs only
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = RenderedError {
            kind: self.kind(),
            body: ErrorResponse::from(&self),
            detail: error_chain(&self),
        };

        let mut response = (StatusCode::BAD_REQUEST, Json(rendered.body.clone())).into_response();
        response.extensions_mut().insert(rendered);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

/// HTTP status for an error kind under the given mapping.
pub fn status_for(kind: ErrorKind, mapping: ErrorMapping) -> StatusCode {
    match mapping {
        ErrorMapping::Collapsed => StatusCode::BAD_REQUEST,
        ErrorMapping::Typed => match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument | ErrorKind::Validation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Storage | ErrorKind::Configuration | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    }
}

/// Applies the error mapping and normalizes every error body.
pub async fn error_response_middleware(
    State(mapping): State<ErrorMapping>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    if let Some(rendered) = response.extensions().get::<RenderedError>().cloned() {
        return render_app_error(rendered, mapping, request_id.as_deref());
    }

    let status = response.status();
    if (status.is_client_error() || status.is_server_error()) && !is_json(response.headers()) {
        return render_plain_error(response, request_id.as_deref());
    }

    response
}

fn render_app_error(rendered: RenderedError, mapping: ErrorMapping, request_id: Option<&str>) -> Response {
    let status = status_for(rendered.kind, mapping);
    let request_id_field = request_id.unwrap_or("unknown");

    if rendered.kind.is_server_side() {
        tracing::error!(
            request_id = %request_id_field,
            code = rendered.kind.code(),
            status = status.as_u16(),
            error = %rendered.detail,
            "Request failed"
        );
    } else {
        tracing::warn!(
            request_id = %request_id_field,
            code = rendered.kind.code(),
            status = status.as_u16(),
            error = %rendered.detail,
            "Request rejected"
        );
    }

    let mut body = rendered.body;
    if let Some(id) = request_id {
        body = body.with_request_id(id);
    }
    (status, Json(body)).into_response()
}

fn render_plain_error(response: Response, request_id: Option<&str>) -> Response {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("Request failed");
    let code = reason.to_uppercase().replace([' ', '-'], "_");

    let mut body = ErrorResponse::new(&code, reason);
    if let Some(id) = request_id {
        body = body.with_request_id(id);
    }

    let mut rewritten = (status, Json(body)).into_response();
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    fn all_kinds() -> [ErrorKind; 8] {
        [
            ErrorKind::NotFound,
            ErrorKind::InvalidArgument,
            ErrorKind::StorageUnavailable,
            ErrorKind::Storage,
            ErrorKind::Validation,
            ErrorKind::BadRequest,
            ErrorKind::Configuration,
            ErrorKind::Internal,
        ]
    }

    #[test]
    fn test_collapsed_mapping_is_always_bad_request() {
        for kind in all_kinds() {
            assert_eq!(status_for(kind, ErrorMapping::Collapsed), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_typed_mapping() {
        let typed = |kind| status_for(kind, ErrorMapping::Typed);
        assert_eq!(typed(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(typed(ErrorKind::InvalidArgument), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(typed(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(typed(ErrorKind::StorageUnavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(typed(ErrorKind::Storage), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(typed(ErrorKind::BadRequest), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_defaults_to_bad_request() {
        let response = AppError::from(RepositoryError::not_found(3)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let rendered = response.extensions().get::<RenderedError>().unwrap();
        assert_eq!(rendered.kind, ErrorKind::NotFound);
        assert_eq!(rendered.body.message, "User with id 3 was not found");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let error = AppError::from(RepositoryError::unavailable(anyhow::anyhow!("connection refused")));
        assert_eq!(error_chain(&error), "Storage is unavailable: connection refused");
    }

    async fn not_found() -> Result<(), AppError> {
        Err(RepositoryError::not_found(7).into())
    }

    fn app(mapping: ErrorMapping) -> Router {
        Router::new()
            .route("/missing", get(not_found))
            .layer(middleware::from_fn_with_state(mapping, error_response_middleware))
    }

    async fn send(router: Router, uri: &str) -> (StatusCode, ErrorResponse) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_middleware_applies_typed_mapping() {
        let (status, body) = send(app(ErrorMapping::Typed), "/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_middleware_keeps_collapsed_status() {
        let (status, body) = send(app(ErrorMapping::Collapsed), "/missing").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.request_id, None);
    }

    #[tokio::test]
    async fn test_unknown_route_gets_error_body() {
        let (status, body) = send(app(ErrorMapping::Collapsed), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Not Found");
    }
}
