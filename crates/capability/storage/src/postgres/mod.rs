//! PostgreSQL 客户端/服务器后端
//!
//! 与嵌入式后端共用同一套解析/写入算法，差异只在方言：
//! `$n` 占位符与命名约束冲突目标（参见 `dialect` 模块）。

pub mod schema;

use crate::backend::{SqlArg, SqlBackend};
use crate::connection::connect_pg_pool;
use crate::dialect::{PostgresDialect, SqlDialect};
use crate::error::StorageError;
use sqlx::PgPool;

/// PostgreSQL 后端。
pub struct PgBackend {
    pub pool: PgPool,
    dialect: PostgresDialect,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            dialect: PostgresDialect::new(),
        }
    }

    /// 通过数据库 URL 建立连接池。
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = connect_pg_pool(database_url, max_connections).await?;
        Ok(Self::new(pool))
    }

    /// 幂等建表（含命名唯一约束，冲突目标语法依赖这些约束名）。
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        schema::ensure_schema(&self.pool).await
    }
}

#[async_trait::async_trait]
impl SqlBackend for PgBackend {
    fn dialect(&self) -> &dyn SqlDialect {
        &self.dialect
    }

    async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<u64, StorageError> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = match arg {
                SqlArg::Text(value) => query.bind(value.clone()),
                SqlArg::Int(value) => query.bind(*value),
                SqlArg::Real(value) => query.bind(*value),
            };
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn fetch_optional_id(
        &self,
        sql: &str,
        args: &[SqlArg],
    ) -> Result<Option<i64>, StorageError> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        for arg in args {
            query = match arg {
                SqlArg::Text(value) => query.bind(value.clone()),
                SqlArg::Int(value) => query.bind(*value),
                SqlArg::Real(value) => query.bind(*value),
            };
        }
        let id = query.fetch_optional(&self.pool).await?;
        Ok(id)
    }
}
