use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD service for user records",
    ),
    paths(
        crate::api::handlers::users::list_users,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::models::User,
            crate::api::dto::CreateUserRequest,
            crate::api::dto::UpdateUserRequest,
            crate::api::dto::ErrorResponse,
            crate::api::dto::HealthResponse,
            crate::api::dto::HealthStatus,
            crate::api::dto::ComponentHealth,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/users"));
        assert!(paths.contains_key("/api/users/{id}"));
        assert!(paths.contains_key("/health/live"));
        assert_eq!(doc.info.title, "Users API");
    }
}
