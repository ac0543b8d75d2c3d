//! 应用运行配置加载。

use std::env;

/// 默认连接池大小。
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 实体存储后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub probe_fail_on_missing: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let store = read_store_backend("COLLAB_STORE")?;
        let database_url = read_optional("COLLAB_DATABASE_URL");
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("COLLAB_DATABASE_URL".to_string()));
        }
        let db_max_connections =
            read_u32_with_default("COLLAB_DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "COLLAB_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }
        let probe_fail_on_missing = read_bool_with_default("COLLAB_PROBE_FAIL_ON_MISSING", true)?;

        Ok(Self {
            store,
            database_url,
            db_max_connections,
            probe_fail_on_missing,
        })
    }
}

fn read_store_backend(key: &str) -> Result<StoreBackend, ConfigError> {
    let value = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(StoreBackend::Postgres),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "memory" | "in_memory" => Ok(StoreBackend::Memory),
        "postgres" | "pg" => Ok(StoreBackend::Postgres),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> Result<bool, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
