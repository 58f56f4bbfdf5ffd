//! SQL 方言适配
//!
//! 两个后端共用同一套解析/写入算法，差异收敛到三项能力：
//! 占位符渲染、冲突容忍插入语法、唯一约束名查询。

use crate::error::StorageError;
use std::collections::HashMap;

/// 后端 SQL 方言能力。
pub trait SqlDialect: Send + Sync {
    /// 渲染第 `index` 个参数占位符（从 1 开始计数）。
    fn placeholder(&self, index: usize) -> String;

    /// 冲突容忍插入的动词前缀。
    fn insert_verb(&self) -> &'static str;

    /// 冲突容忍插入的结尾子句（可为空串）。
    fn conflict_suffix(&self, table: &str) -> Result<String, StorageError>;
}

/// 嵌入式 SQLite 方言：`INSERT OR IGNORE` + `?` 占位符。
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn insert_verb(&self) -> &'static str {
        "INSERT OR IGNORE"
    }

    fn conflict_suffix(&self, _table: &str) -> Result<String, StorageError> {
        Ok(String::new())
    }
}

/// PostgreSQL 方言：`$n` 占位符 + 命名约束冲突目标。
///
/// `ON CONFLICT ON CONSTRAINT ... DO NOTHING` 需要引用稳定的约束名，
/// 因此每张表的唯一约束名作为配置随方言携带（与建表语句保持一致）。
pub struct PostgresDialect {
    constraint_names: HashMap<&'static str, &'static str>,
}

impl PostgresDialect {
    pub fn new() -> Self {
        let mut constraint_names = HashMap::new();
        constraint_names.insert("units", "units_name_key");
        constraint_names.insert("type", "type_name_key");
        constraint_names.insert("sensor", "sensor_name_key");
        Self { constraint_names }
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn insert_verb(&self) -> &'static str {
        "INSERT"
    }

    fn conflict_suffix(&self, table: &str) -> Result<String, StorageError> {
        let name = self
            .constraint_names
            .get(table)
            .ok_or_else(|| StorageError::UnknownConstraint(table.to_string()))?;
        Ok(format!(" ON CONFLICT ON CONSTRAINT {name} DO NOTHING"))
    }
}
