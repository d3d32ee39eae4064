//! User CRUD request handlers.
//!
//! Each handler makes exactly one repository call; failures travel back as
//! `AppError` and are rendered by the error middleware.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, UpdateUserRequest};
use crate::api::extract::{ApiPath, ValidatedJson};
use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List all users
/// - POST /       - Create a new user
/// - GET /{id}    - Get user by ID
/// - PUT /{id}    - Replace user by ID
/// - DELETE /{id} - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Every user, ordered by id", body = Vec<User>),
        (status = 400, description = "Storage failure", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Unknown id or malformed id", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<User>> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Create a user
///
/// The store assigns the id; the response carries the persisted user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Invalid body or storage failure", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Json<User>> {
    let user = state.users.add(payload.into_new_user()).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok(Json(user))
}

/// Replace a user
///
/// The body id must match the path id. Answers 200 with an empty body.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User replaced"),
        (status = 400, description = "Id mismatch, unknown id or invalid body", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    state.users.update(id, payload.into_user()).await?;
    tracing::info!(user_id = id, "User updated");
    Ok(StatusCode::OK)
}

/// Delete a user
///
/// Returns `true` if a user was removed and `false` if there was none.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Whether a user was removed", body = bool),
        (status = 400, description = "Malformed id or storage failure", body = ErrorResponse)
    ),
    tag = USER_TAG
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<bool>> {
    let removed = state.users.delete(id).await?;
    if removed {
        tracing::info!(user_id = id, "User deleted");
    }
    Ok(Json(removed))
}
