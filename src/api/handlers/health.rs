//! Health check endpoint handlers.
//!
//! Storage connectivity is probed through the repository, so the same
//! checks work for the PostgreSQL and in-memory backends.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Detailed health check
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

/// Detailed health check.
///
/// Answers 503 with the same body when storage cannot be reached.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = check_storage(&state).await;
    let status = storage.status;

    let mut checks = BTreeMap::new();
    checks.insert("storage".to_string(), storage);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

/// Readiness probe: ready once storage answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_storage(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Liveness probe: the process is up and serving.
#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Service is alive")),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_storage(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let result = state.users.ping().await;
    let response_time_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Connected".to_string()),
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
                response_time_ms,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::api::routes::create_router;
    use crate::config::ErrorMapping;
    use crate::error::RepositoryError;
    use crate::repositories::MockUserRepository;

    use super::*;

    fn app(ping_ok: bool) -> Router {
        let mut repo = MockUserRepository::new();
        repo.expect_ping().returning(move || {
            if ping_ok {
                Ok(())
            } else {
                Err(RepositoryError::unavailable(anyhow::anyhow!("connection refused")))
            }
        });
        create_router(
            AppState::new(Arc::new(repo), ErrorMapping::Collapsed),
            Duration::from_secs(30),
        )
    }

    async fn get_status(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_reports_storage() {
        let (status, body) = get_status(app(true), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.version, crate::pkg_version());
        assert!(health.timestamp.parse::<jiff::Timestamp>().is_ok());
        assert_eq!(health.checks["storage"].status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_health_unhealthy_storage() {
        let (status, body) = get_status(app(false), "/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(
            health.checks["storage"].message.as_deref(),
            Some("Storage is unavailable")
        );
    }

    #[tokio::test]
    async fn test_readiness_follows_storage() {
        assert_eq!(get_status(app(true), "/health/ready").await.0, StatusCode::OK);
        assert_eq!(
            get_status(app(false), "/health/ready").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_liveness_ignores_storage() {
        assert_eq!(get_status(app(false), "/health/live").await.0, StatusCode::OK);
    }
}
