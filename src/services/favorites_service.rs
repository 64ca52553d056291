// Favorites lists: one atomic update-and-return per call, only the touched list
// goes back to the caller.

use crate::{
    database::UserStore,
    models::FavoritesList,
    utils::AppError,
};
use serde::Deserialize;
use serde_json::Value;

/// Body of the four favorites endpoints. `data` is the opaque payload the
/// client stores; `movieId`/`tvId` from older clients are ignored.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct FavoriteRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub data: Value,
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub async fn add_favorite(
    store: &dyn UserStore,
    list: FavoritesList,
    request: FavoriteRequest,
) -> Result<Vec<Value>, AppError> {
    let mut user = store
        .push_favorite(&request.user_id, list, request.data)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(std::mem::take(user.favorites_mut(list)))
}

pub async fn remove_favorite(
    store: &dyn UserStore,
    list: FavoritesList,
    request: FavoriteRequest,
) -> Result<Vec<Value>, AppError> {
    let mut user = store
        .pull_favorite(&request.user_id, list, request.data)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(std::mem::take(user.favorites_mut(list)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::InMemoryUserStore, models::User};
    use serde_json::json;

    async fn seeded() -> (InMemoryUserStore, String) {
        let store = InMemoryUserStore::new();
        let user = store
            .insert_user(User::new("a".into(), "a@x.com".into(), "hash".into()))
            .await
            .unwrap();
        (store, user.id.unwrap().to_hex())
    }

    fn request(user_id: &str, data: Value) -> FavoriteRequest {
        FavoriteRequest {
            user_id: user_id.to_string(),
            data,
        }
    }

    #[tokio::test]
    async fn test_duplicates_kept_and_removed_one_at_a_time() {
        let (store, id) = seeded().await;
        let show = json!({ "name": "Dark", "id": 70523 });

        add_favorite(&store, FavoritesList::Tv, request(&id, show.clone())).await.unwrap();
        let list = add_favorite(&store, FavoritesList::Tv, request(&id, show.clone()))
            .await
            .unwrap();
        assert_eq!(list, vec![show.clone(), show.clone()]);

        let list = remove_favorite(&store, FavoritesList::Tv, request(&id, show.clone()))
            .await
            .unwrap();
        assert_eq!(list, vec![show]);
    }

    #[tokio::test]
    async fn test_lists_are_independent() {
        let (store, id) = seeded().await;

        let movies = add_favorite(&store, FavoritesList::Movies, request(&id, json!("Dune")))
            .await
            .unwrap();
        assert_eq!(movies, vec![json!("Dune")]);

        let tv = remove_favorite(&store, FavoritesList::Tv, request(&id, json!("Dune")))
            .await
            .unwrap();
        assert!(tv.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (store, _) = seeded().await;

        let result = add_favorite(&store, FavoritesList::Movies, request("nobody", json!(1))).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
