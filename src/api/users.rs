use actix_web::{web, HttpResponse};
use crate::{
    api::{failure, metrics},
    config::Config,
    database::UserStore,
    models::UserResponse,
    services::user_service::{self, GetMeRequest, LoginRequest, RegisterRequest},
    utils::ErrorResponse,
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn register(
    store: web::Data<dyn UserStore>,
    config: web::Data<Config>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    metrics::record_request();
    let request = request.into_inner();
    log::info!("📝 POST /register - email: {}", request.email);

    match user_service::register(store.get_ref(), request, config.bcrypt_cost).await {
        Ok(user) => {
            metrics::record_registration();
            HttpResponse::Created().json(UserResponse::from(user))
        }
        Err(e) => failure("Registration", e),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Credentials match", body = UserResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn login(
    store: web::Data<dyn UserStore>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    metrics::record_request();
    let request = request.into_inner();
    log::info!("🔐 POST /login - email: {}", request.email);

    match user_service::login(store.get_ref(), request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", user.email);
            HttpResponse::Created().json(UserResponse::from(user))
        }
        Err(e) => failure("Login", e),
    }
}

#[utoipa::path(
    post,
    path = "/getMe",
    tag = "Users",
    request_body = GetMeRequest,
    responses(
        (status = 201, description = "User profile", body = UserResponse),
        (status = 401, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_me(
    store: web::Data<dyn UserStore>,
    request: web::Json<GetMeRequest>,
) -> HttpResponse {
    metrics::record_request();
    log::info!("👤 POST /getMe - id: {}", request.id);

    match user_service::get_me(store.get_ref(), &request.id).await {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(e) => failure("Profile lookup", e),
    }
}
