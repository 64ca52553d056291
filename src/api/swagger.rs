use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Favorites Service API",
        version = "1.0.0",
        description = "User registration, login and per-user favorite movie / TV lists.\n\nNo tokens are issued: clients keep the returned `_id` and send it with later calls."
    ),
    paths(
        crate::api::users::register,
        crate::api::users::login,
        crate::api::users::get_me,

        crate::api::favorites::add_favorite_movie,
        crate::api::favorites::remove_favorite_movie,
        crate::api::favorites::add_favorite_tv,
        crate::api::favorites::remove_favorite_tv,

        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::services::user_service::RegisterRequest,
            crate::services::user_service::LoginRequest,
            crate::services::user_service::GetMeRequest,
            crate::services::favorites_service::FavoriteRequest,
            crate::models::UserResponse,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login and profile lookup."),
        (name = "Favorites", description = "Append to or remove from a user's favorite movies and TV shows."),
        (name = "Health", description = "Liveness and counters for monitoring."),
    )
)]
pub struct ApiDoc;
