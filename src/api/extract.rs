//! Extractors whose rejections are `AppError`, so malformed requests get the
//! same error body as every other failure.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection, rejection::PathRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that is deserialized and then checked with `validator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters; a value that fails to parse is a `BadRequest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, max = 5, message = "must be between 1 and 5 characters"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/probe")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let ValidatedJson(probe) = ValidatedJson::<Probe>::from_request(json_request(r#"{"name":"Ann"}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.name, "Ann");
    }

    #[tokio::test]
    async fn test_invalid_field_is_validation_error() {
        let result = ValidatedJson::<Probe>::from_request(json_request(r#"{"name":"Annabel"}"#), &()).await;

        match result {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "name");
                assert_eq!(reason, "must be between 1 and 5 characters");
            }
            other => panic!("Expected Validation error, got {:?}", other.map(|v| v.0)),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let result = ValidatedJson::<Probe>::from_request(json_request("{name:"), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/probe")
            .body(Body::from(r#"{"name":"Ann"}"#))
            .unwrap();

        let result = ValidatedJson::<Probe>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}
