//! SQLite 模式管理
//!
//! 幂等建表；删表重建仅用于测试库初始化。
//! 本模块只负责 DDL，核心解析逻辑不触达建表。

use crate::error::StorageError;
use sqlx::SqlitePool;

/// 建表语句（按外键依赖自底向上排列）。
const CREATE_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS units (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS type (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        units INTEGER,
        FOREIGN KEY(units) REFERENCES units(id)
    )",
    "CREATE TABLE IF NOT EXISTS sensor (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        type INTEGER NOT NULL,
        FOREIGN KEY(type) REFERENCES type(id)
    )",
    "CREATE TABLE IF NOT EXISTS measurement (
        timestamp TEXT NOT NULL,
        sensor INTEGER NOT NULL,
        value REAL NOT NULL,
        PRIMARY KEY(timestamp, sensor),
        FOREIGN KEY(sensor) REFERENCES sensor(id)
    )",
];

/// 删表语句（按外键依赖自顶向下排列）。
const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS measurement",
    "DROP TABLE IF EXISTS sensor",
    "DROP TABLE IF EXISTS type",
    "DROP TABLE IF EXISTS units",
];

/// 幂等创建全部四张表。
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for statement in CREATE_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// 删除并重建全部表。会清空已有数据。
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for statement in DROP_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    ensure_schema(pool).await
}
