//! 后端执行能力接口

use crate::dialect::SqlDialect;
use crate::error::StorageError;
use async_trait::async_trait;

/// 参数化语句的参数值。
#[derive(Debug, Clone)]
pub enum SqlArg {
    Text(String),
    Int(i64),
    Real(f64),
}

/// 数据库后端能力：方言 + 参数化语句执行。
///
/// 解析器与写入器只通过这个接口触达数据库，
/// 两个后端各自实现绑定与执行。
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// 本后端的 SQL 方言。
    fn dialect(&self) -> &dyn SqlDialect;

    /// 执行写语句，返回受影响行数。
    async fn execute(&self, sql: &str, args: &[SqlArg]) -> Result<u64, StorageError>;

    /// 查询单个 id 列（至多一行）。
    async fn fetch_optional_id(
        &self,
        sql: &str,
        args: &[SqlArg],
    ) -> Result<Option<i64>, StorageError>;
}
