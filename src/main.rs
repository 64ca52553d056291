mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use config::{Config, StoreBackend};
use database::{InMemoryUserStore, UserStore};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn connect_store(backend: &StoreBackend) -> std::io::Result<Arc<dyn UserStore>> {
    match backend {
        StoreBackend::MongoDB { url, database } => {
            match database::MongoDB::new(url, database.as_deref()).await {
                Ok(db) => {
                    log::info!("✅ MongoDB connected successfully");
                    Ok(Arc::new(db))
                }
                Err(e) => {
                    log::error!("❌ Failed to connect to MongoDB: {}", e);
                    Err(std::io::Error::other(e.to_string()))
                }
            }
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory user store, data is lost on restart");
            Ok(Arc::new(InMemoryUserStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    log::info!("🚀 Starting Favorites Service...");

    let store = web::Data::from(connect_store(&config.store).await?);
    let bind_addr = (config.host.clone(), config.port);
    let cors_origin = config.cors_origin.clone();
    let config = web::Data::new(config);

    log::info!("🌐 Server starting on {}:{}", bind_addr.0, bind_addr.1);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", bind_addr.0, bind_addr.1);
    log::info!("🔓 CORS origin: {}", cors_origin);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(store.clone())
            .app_data(config.clone())
            .app_data(api::json_config())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
