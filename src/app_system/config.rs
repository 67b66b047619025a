use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

const DEFAULT_JSON_PATH: &str = "products.json";
const DEFAULT_DATABASE_URL: &str = "sqlite://products.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which backend holds the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Json,
    Sql,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreKind::Json),
            "sql" | "sqlite" => Ok(StoreKind::Sql),
            _ => Err(ConfigError::Invalid { key: "CATALOG_STORE", value: s.to_string() }),
        }
    }
}

/// Process settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret expected in the `TOKEN` header.
    pub token: String,
    pub store: StoreKind,
    pub json_path: PathBuf,
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("TOKEN"))?;

        let store = match lookup("CATALOG_STORE") {
            Some(value) => value.parse()?,
            None => StoreKind::Json,
        };

        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|_| ConfigError::Invalid { key: "BIND_ADDR", value: bind_value.clone() })?;

        Ok(Self {
            token,
            store,
            json_path: lookup("CATALOG_JSON_PATH")
                .unwrap_or_else(|| DEFAULT_JSON_PATH.to_string())
                .into(),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
        })
    }
}
