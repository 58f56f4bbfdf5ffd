//! 数据库连接管理
//!
//! 提供两种后端的连接池初始化；连接级失败统一映射为
//! `StorageError::Connection`。

use crate::error::StorageError;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;

/// 建立 Postgres 连接池。
pub async fn connect_pg_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
    Ok(pool)
}

/// 建立 SQLite 连接池（文件不存在时创建，启用外键约束）。
pub async fn connect_sqlite_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|err| StorageError::Connection(err.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
    Ok(pool)
}
