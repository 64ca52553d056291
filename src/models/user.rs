use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// User document as stored in MongoDB.
///
/// `password` holds the bcrypt hash and must never leave the service;
/// use [`UserResponse`] for anything sent to a caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "favoritesMovies", default)]
    pub favorites_movies: Vec<Value>,
    #[serde(rename = "favoritesTv", default)]
    pub favorites_tv: Vec<Value>,
}

impl User {
    /// New user with empty favorites; the id is assigned by the store on insert
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            username,
            email,
            password: password_hash,
            favorites_movies: Vec::new(),
            favorites_tv: Vec::new(),
        }
    }

    pub fn favorites_mut(&mut self, list: FavoritesList) -> &mut Vec<Value> {
        match list {
            FavoritesList::Movies => &mut self.favorites_movies,
            FavoritesList::Tv => &mut self.favorites_tv,
        }
    }
}

/// Which of the two favorites arrays an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesList {
    Movies,
    Tv,
}

impl FavoritesList {
    /// Document field backing this list
    pub fn field(self) -> &'static str {
        match self {
            FavoritesList::Movies => "favoritesMovies",
            FavoritesList::Tv => "favoritesTv",
        }
    }
}

/// User as returned by the API (password hash stripped)
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "favoritesMovies")]
    pub favorites_movies: Vec<Value>,
    #[serde(rename = "favoritesTv")]
    pub favorites_tv: Vec<Value>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
            email: user.email,
            favorites_movies: user.favorites_movies,
            favorites_tv: user.favorites_tv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_strips_password() {
        let mut user = User::new(
            "a".to_string(),
            "a@x.com".to_string(),
            "$2b$10$hash".to_string(),
        );
        user.id = Some(ObjectId::new());
        user.favorites_movies.push(json!({ "title": "Dune" }));

        let body = serde_json::to_value(UserResponse::from(user.clone())).unwrap();

        assert!(body.get("password").is_none());
        assert_eq!(body["_id"], json!(user.id.unwrap().to_hex()));
        assert_eq!(body["favoritesMovies"], json!([{ "title": "Dune" }]));
        assert_eq!(body["favoritesTv"], json!([]));
    }

    #[test]
    fn test_stored_document_uses_camel_case_lists() {
        let user = User::new("a".into(), "a@x.com".into(), "hash".into());
        let doc = mongodb::bson::to_document(&user).unwrap();

        assert!(!doc.contains_key("_id"));
        assert!(doc.contains_key("favoritesMovies"));
        assert!(doc.contains_key("favoritesTv"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let user: User = serde_json::from_value(json!({
            "username": "a",
            "email": "a@x.com",
            "password": "hash"
        }))
        .unwrap();

        assert!(user.favorites_movies.is_empty());
        assert!(user.favorites_tv.is_empty());
    }
}
