use std::env;

use crate::error::{ApiError, Result};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_HOST: &str = "cluster0.bpilnp1.mongodb.net";
pub const DEFAULT_DATABASE_NAME: &str = "Blog_DB";
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";

/// Which document store backs the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(ApiError::Config(format!(
                "unknown STORE_BACKEND '{other}' (expected 'mongodb' or 'memory')"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_user: Option<String>,
    pub db_pass: Option<String>,
    pub db_host: String,
    pub mongodb_uri: Option<String>,
    pub database_name: String,
    pub token_secret: String,
    pub client_origin: String,
    pub cookie_secure: bool,
    pub store_backend: StoreBackend,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ApiError::Config(format!("PORT '{raw}' is not a valid port")))?,
            Err(_) => DEFAULT_PORT,
        };

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(raw) => StoreBackend::parse(&raw)?,
            Err(_) => StoreBackend::MongoDb,
        };

        let config = Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            db_user: env::var("DB_USER").ok(),
            db_pass: env::var("DB_PASS").ok(),
            db_host: env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string()),
            mongodb_uri: env::var("MONGODB_URI").ok(),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            token_secret: env::var("ACCESS_TOKEN_SECRET").unwrap_or_default(),
            client_origin: env::var("CLIENT_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CLIENT_ORIGIN.to_string()),
            cookie_secure: env::var("COOKIE_SECURE")
                .ok()
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
            store_backend,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_secret.is_empty() {
            return Err(ApiError::Config(
                "ACCESS_TOKEN_SECRET must be set".to_string(),
            ));
        }

        if self.client_origin.is_empty() || self.client_origin == "*" {
            return Err(ApiError::Config(
                "CLIENT_ORIGIN must name a single origin".to_string(),
            ));
        }

        if self.store_backend == StoreBackend::MongoDb
            && self.mongodb_uri.is_none()
            && (self.db_user.is_none() || self.db_pass.is_none())
        {
            return Err(ApiError::Config(
                "set DB_USER and DB_PASS, or MONGODB_URI".to_string(),
            ));
        }

        Ok(())
    }

    /// Connection string for the document store.
    pub fn mongodb_uri(&self) -> String {
        if let Some(uri) = &self.mongodb_uri {
            return uri.clone();
        }

        let user = self.db_user.as_deref().unwrap_or_default();
        let pass = self.db_pass.as_deref().unwrap_or_default();
        format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            urlencoding::encode(user),
            urlencoding::encode(pass),
            self.db_host
        )
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
