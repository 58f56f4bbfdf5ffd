//! PostgreSQL 模式管理
//!
//! 唯一约束必须具名（units_name_key / type_name_key / sensor_name_key），
//! 连接器的 `ON CONFLICT ON CONSTRAINT` 冲突目标按名引用它们。

use crate::error::StorageError;
use sqlx::PgPool;

/// 建表语句（按外键依赖自底向上排列）。
const CREATE_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS units (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        CONSTRAINT units_name_key UNIQUE (name)
    )",
    "CREATE TABLE IF NOT EXISTS type (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        units BIGINT REFERENCES units(id),
        CONSTRAINT type_name_key UNIQUE (name)
    )",
    "CREATE TABLE IF NOT EXISTS sensor (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        type BIGINT NOT NULL REFERENCES type(id),
        CONSTRAINT sensor_name_key UNIQUE (name)
    )",
    "CREATE TABLE IF NOT EXISTS measurement (
        timestamp TEXT NOT NULL,
        sensor BIGINT NOT NULL REFERENCES sensor(id),
        value DOUBLE PRECISION NOT NULL,
        PRIMARY KEY (timestamp, sensor)
    )",
];

/// 幂等创建全部四张表。
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StorageError> {
    for statement in CREATE_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
