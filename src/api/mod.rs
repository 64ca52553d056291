pub mod favorites;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use crate::utils::AppError;
use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

/// Registers every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .route("/register", web::post().to(users::register))
        .route("/login", web::post().to(users::login))
        .route("/getMe", web::post().to(users::get_me))
        .route("/addFavoriteMovie", web::post().to(favorites::add_favorite_movie))
        .route("/removeFavoriteMovie", web::post().to(favorites::remove_favorite_movie))
        .route("/addFavoriteTv", web::post().to(favorites::add_favorite_tv))
        .route("/removeFavoriteTv", web::post().to(favorites::remove_favorite_tv));
}

/// Malformed or incomplete JSON bodies answer with the regular error shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = AppError::InvalidRequest(err.to_string()).error_response();
        metrics::record_error();
        InternalError::from_response(err, response).into()
    })
}

/// Logs a failed request and turns the error into its HTTP response.
/// Store and internal failures are logged in full; the caller only sees
/// a generic message.
pub(crate) fn failure(context: &str, err: AppError) -> HttpResponse {
    metrics::record_error();

    match &err {
        AppError::DatabaseError(_) | AppError::Internal(_) => {
            log::error!("❌ {} failed: {}", context, err)
        }
        _ => log::warn!("❌ {} failed: {}", context, err),
    }

    err.error_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::{Config, StoreBackend};
    use crate::database::{InMemoryUserStore, UserStore};
    use actix_web::web;
    use std::sync::Arc;

    pub fn store() -> web::Data<dyn UserStore> {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        web::Data::from(store)
    }

    pub fn config() -> web::Data<Config> {
        web::Data::new(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: "http://localhost:3000".to_string(),
            bcrypt_cost: 4,
            store: StoreBackend::Memory,
        })
    }
}
