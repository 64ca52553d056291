use crate::{
    database::UserStore,
    models::{FavoritesList, User},
    utils::AppError,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

/// Process-local user store with the same semantics as the MongoDB one.
/// Backs `USER_STORE=memory` and the handler tests.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

fn matches_id(user: &User, id: &str) -> bool {
    match ObjectId::parse_str(id) {
        Ok(oid) => user.id == Some(oid),
        Err(_) => false,
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| matches_id(u, id)).cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on email
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn push_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| matches_id(u, user_id)) else {
            return Ok(None);
        };

        user.favorites_mut(list).push(item);
        Ok(Some(user.clone()))
    }

    async fn pull_favorite(
        &self,
        user_id: &str,
        list: FavoritesList,
        item: Value,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| matches_id(u, user_id)) else {
            return Ok(None);
        };

        let favorites = user.favorites_mut(list);
        if let Some(pos) = favorites.iter().position(|f| *f == item) {
            favorites.remove(pos);
        }
        Ok(Some(user.clone()))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
