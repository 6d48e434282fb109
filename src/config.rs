use std::sync::Arc;

use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::middleware::auth::JwtKeys;

// Read once at startup; nothing reads the environment after this.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_owned());

        Ok(AppConfig {
            database_url,
            bind_addr,
            jwt_secret,
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: &AppConfig) -> AppState {
        AppState {
            db,
            keys: Arc::new(JwtKeys::new(&config.jwt_secret)),
        }
    }
}
