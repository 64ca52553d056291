use crate::{
    database::UserStore,
    models::User,
    utils::AppError,
};
use actix_web::web;
use serde::Deserialize;

/// Work factor used when none is configured
pub const DEFAULT_HASH_COST: u32 = 10;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GetMeRequest {
    pub id: String,
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(())
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    web::block(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))
}

/// Creates a user, rejecting an email that is already registered
pub async fn register(
    store: &dyn UserStore,
    request: RegisterRequest,
    hash_cost: u32,
) -> Result<User, AppError> {
    require(&request.username, "Username")?;
    require(&request.email, "Email")?;
    require(&request.password, "Password")?;

    if store.find_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "User with email {} already exists",
            request.email
        )));
    }

    let hashed_password = hash_password(request.password, hash_cost).await?;

    // The unique index still catches a concurrent registration
    let user = store
        .insert_user(User::new(request.username, request.email, hashed_password))
        .await?;

    log::info!("✅ User registered: {}", user.email);
    Ok(user)
}

pub async fn login(store: &dyn UserStore, request: LoginRequest) -> Result<User, AppError> {
    let user = store
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User with this email not found".to_string()))?;

    if !verify_password(request.password, user.password.clone()).await? {
        return Err(AppError::AuthMismatch("Password does not match".to_string()));
    }

    Ok(user)
}

pub async fn get_me(store: &dyn UserStore, id: &str) -> Result<User, AppError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryUserStore;

    const TEST_COST: u32 = 4;

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: "a".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_hashes_password() {
        let store = InMemoryUserStore::new();

        let user = register(&store, register_request("a@x.com", "secret"), TEST_COST)
            .await
            .unwrap();

        assert_ne!(user.password, "secret");
        assert!(bcrypt::verify("secret", &user.password).unwrap());

        let fetched = get_me(&store, &user.id.unwrap().to_hex()).await.unwrap();
        assert_eq!(fetched.username, "a");
        assert_eq!(fetched.email, "a@x.com");
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_halts() {
        let store = InMemoryUserStore::new();
        register(&store, register_request("a@x.com", "secret"), TEST_COST).await.unwrap();

        let second = register(&store, register_request("a@x.com", "other"), TEST_COST).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[actix_web::test]
    async fn test_register_rejects_blank_fields() {
        let store = InMemoryUserStore::new();

        let result = register(&store, register_request("  ", "secret"), TEST_COST).await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(store.len().await, 0);
    }

    #[actix_web::test]
    async fn test_login_outcomes() {
        let store = InMemoryUserStore::new();
        let user = register(&store, register_request("a@x.com", "secret"), TEST_COST).await.unwrap();

        let ok = login(
            &store,
            LoginRequest { email: "a@x.com".into(), password: "secret".into() },
        )
        .await
        .unwrap();
        assert_eq!(ok.id, user.id);

        let wrong = login(
            &store,
            LoginRequest { email: "a@x.com".into(), password: "nope".into() },
        )
        .await;
        assert!(matches!(wrong, Err(AppError::AuthMismatch(_))));

        let unknown = login(
            &store,
            LoginRequest { email: "b@x.com".into(), password: "secret".into() },
        )
        .await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));
    }
}
