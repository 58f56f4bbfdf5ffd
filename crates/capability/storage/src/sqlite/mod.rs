//! SQLite 嵌入式文件后端

pub mod schema;

use crate::backend::{SqlArg, SqlBackend};
use crate::connection::connect_sqlite_pool;
use crate::dialect::{SqlDialect, SqliteDialect};
use crate::error::StorageError;
use sqlx::SqlitePool;

/// 嵌入式文件后端。
pub struct SqliteBackend {
    pub pool: SqlitePool,
    dialect: SqliteDialect,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            dialect: SqliteDialect,
        }
    }

    /// 通过数据库 URL 建立连接池。
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = connect_sqlite_pool(database_url, max_connections).await?;
        Ok(Self::new(pool))
    }

    /// 幂等建表。
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        schema::ensure_schema(&self.pool).await
    }

    /// 删表重建（破坏性，清空已有数据，仅用于测试库初始化）。
    pub async fn reset_schema(&self) -> Result<(), StorageError> {
        schema::reset_schema(&self.pool).await
    }
}

#[async_trait::async_trait]
impl SqlBackend for SqliteBackend {
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
