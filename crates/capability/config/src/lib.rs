//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub reset_schema: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("SENSORHUB_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("SENSORHUB_DATABASE_URL".to_string()))?;
        let max_connections = read_u32_with_default("SENSORHUB_MAX_CONNECTIONS", 8)?;
        // 仅对嵌入式 SQLite 后端生效：导入前删表重建
        let reset_schema = read_bool_with_default("SENSORHUB_RESET_SCHEMA", false);

        Ok(Self {
            database_url,
            max_connections,
            reset_schema,
        })
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

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
