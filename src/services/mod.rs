pub mod favorites_service;
pub mod user_service;
