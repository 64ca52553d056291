use crate::{
    models::{FavoritesList, User},
    utils::AppError,
};
use async_trait::async_trait;
use serde_json::Value;

/// Persistence operations needed by the user handlers.
///
/// Ids are the hex form of the store-assigned id. An id that cannot refer to
/// any user (unknown or malformed) yields `Ok(None)`, never an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new user and returns it with its assigned id.
    /// A second user with the same email is rejected with `AppError::Conflict`.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;

    /// Appends `item` to the chosen list and returns the updated user in one step.
    async fn push_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError>;

    /// Removes the first element equal to `item` and returns the updated user
    /// in one step. Later duplicates stay in place.
    async fn pull_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError>;

    async fn health_check(&self) -> Result<bool, AppError>;
}
