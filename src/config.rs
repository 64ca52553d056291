use crate::services::user_service::DEFAULT_HASH_COST;
use std::env;

const DEFAULT_PORT: u16 = 9876;
const DEFAULT_CORS_ORIGIN: &str = "https://movie-app-wine-pi.vercel.app";

/// Which `UserStore` implementation the server runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDB { url: String, database: Option<String> },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    pub store: StoreBackend,
}

impl Config {
    /// Reads the process environment (call `dotenv()` first)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|cost| (4..=31).contains(cost))
                .ok_or_else(|| format!("BCRYPT_COST must be between 4 and 31, got '{}'", raw))?,
            None => DEFAULT_HASH_COST,
        };

        let store = match lookup("USER_STORE").as_deref().unwrap_or("mongodb") {
            "mongodb" => StoreBackend::MongoDB {
                url: lookup("MONGO_URL").ok_or("MONGO_URL must be set")?,
                database: lookup("MONGO_DATABASE"),
            },
            "memory" => StoreBackend::Memory,
            other => {
                return Err(format!(
                    "Invalid USER_STORE: {}. Supported: mongodb, memory",
                    other
                ))
            }
        };

        Ok(Self {
            host,
            port,
            cors_origin,
            bcrypt_cost,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("MONGO_URL", "mongodb://localhost:27017/movies")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9876);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(
            config.store,
            StoreBackend::MongoDB {
                url: "mongodb://localhost:27017/movies".to_string(),
                database: None,
            }
        );
    }

    #[test]
    fn test_mongo_url_required_for_mongodb_store() {
        assert!(config_from(&[]).is_err());

        let config = config_from(&[("USER_STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("USER_STORE", "memory"), ("PORT", "http")]).is_err());
        assert!(config_from(&[("USER_STORE", "memory"), ("BCRYPT_COST", "3")]).is_err());
        assert!(config_from(&[("USER_STORE", "redis")]).is_err());
    }
}
