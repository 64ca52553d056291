use actix_web::{web, HttpResponse};
use crate::{
    api::{failure, metrics},
    database::UserStore,
    models::FavoritesList,
    services::favorites_service::{self, FavoriteRequest},
    utils::ErrorResponse,
};

enum Mutation {
    Add,
    Remove,
}

async fn mutate(
    store: &dyn UserStore,
    list: FavoritesList,
    mutation: Mutation,
    request: FavoriteRequest,
) -> HttpResponse {
    metrics::record_request();
    let action = match mutation {
        Mutation::Add => "add",
        Mutation::Remove => "remove",
    };
    log::info!("⭐ {} {} for user {}", action, list.field(), request.user_id);

    let result = match mutation {
        Mutation::Add => favorites_service::add_favorite(store, list, request).await,
        Mutation::Remove => favorites_service::remove_favorite(store, list, request).await,
    };

    match result {
        Ok(favorites) => HttpResponse::Created().json(favorites),
        Err(e) => failure("Favorites update", e),
    }
}

#[utoipa::path(
    post,
    path = "/addFavoriteMovie",
    tag = "Favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Updated favoritesMovies", body = Vec<serde_json::Value>),
        (status = 401, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_favorite_movie(
    store: web::Data<dyn UserStore>,
    request: web::Json<FavoriteRequest>,
) -> HttpResponse {
    mutate(store.get_ref(), FavoritesList::Movies, Mutation::Add, request.into_inner()).await
}

#[utoipa::path(
    post,
    path = "/removeFavoriteMovie",
    tag = "Favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Updated favoritesMovies", body = Vec<serde_json::Value>),
        (status = 401, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn remove_favorite_movie(
    store: web::Data<dyn UserStore>,
    request: web::Json<FavoriteRequest>,
) -> HttpResponse {
    mutate(store.get_ref(), FavoritesList::Movies, Mutation::Remove, request.into_inner()).await
}

#[utoipa::path(
    post,
    path = "/addFavoriteTv",
    tag = "Favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Updated favoritesTv", body = Vec<serde_json::Value>),
        (status = 401, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_favorite_tv(
    store: web::Data<dyn UserStore>,
    request: web::Json<FavoriteRequest>,
) -> HttpResponse {
    mutate(store.get_ref(), FavoritesList::Tv, Mutation::Add, request.into_inner()).await
}

#[utoipa::path(
    post,
    path = "/removeFavoriteTv",
    tag = "Favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Updated favoritesTv", body = Vec<serde_json::Value>),
        (status = 401, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn remove_favorite_tv(
    store: web::Data<dyn UserStore>,
    request: web::Json<FavoriteRequest>,
) -> HttpResponse {
    mutate(store.get_ref(), FavoritesList::Tv, Mutation::Remove, request.into_inner()).await
}
