//! 层级引用解析
//!
//! 按 units → type → sensor 的外键依赖顺序逐级执行
//! 冲突容忍插入 + 按名称回查 id，并写穿各层级缓存。

use crate::backend::{SqlArg, SqlBackend};
use crate::cache::ReferenceCache;
use crate::error::StorageError;
use domain::Sensor;
use tracing::debug;

/// 三个层级的表名（按外键依赖自底向上）。
pub const UNITS_TABLE: &str = "units";
pub const TYPE_TABLE: &str = "type";
pub const SENSOR_TABLE: &str = "sensor";

/// 连接器持有的各层级 id 缓存。
///
/// 显式构造、按引用传入解析与写入调用，绝不做成全局状态。
pub struct LevelCaches {
    pub units: ReferenceCache,
    pub types: ReferenceCache,
    pub sensors: ReferenceCache,
}

impl LevelCaches {
    pub fn new() -> Self {
        Self {
            units: ReferenceCache::new(UNITS_TABLE),
            types: ReferenceCache::new(TYPE_TABLE),
            sensors: ReferenceCache::new(SENSOR_TABLE),
        }
    }
}

impl Default for LevelCaches {
    fn default() -> Self {
        Self::new()
    }
}

/// 一次层级解析的唯一键与附加列。
///
/// `extra` 为键列之外的 (列名, 值) 列表，长度任意；
/// 插入语句由列表长度统一生成，不区分有无父级两种形态。
pub struct LevelInsert<'v> {
    pub table: &'static str,
    pub key: &'v str,
    pub extra: Vec<(&'static str, SqlArg)>,
}

/// 层级解析器：把传感器描述解析为各层级代理主键。
pub struct HierarchicalResolver<'a, B: SqlBackend> {
    backend: &'a B,
}

impl<'a, B: SqlBackend> HierarchicalResolver<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 解析（必要时创建）传感器完整依赖链，返回 sensor 层 id。
    ///
    /// 每级的插入与回查各自独立提交，不包成一个多级事务；
    /// 中途失败后低层级可能已提交，重新调用本操作即可恢复。
    pub async fn resolve_sensor(
        &self,
        sensor: &Sensor,
        caches: &LevelCaches,
    ) -> Result<i64, StorageError> {
        let units_id = match sensor.units.as_deref() {
            Some(units) => Some(
                self.resolve_level(
                    LevelInsert {
                        table: UNITS_TABLE,
                        key: units,
                        extra: Vec::new(),
                    },
                    &caches.units,
                )
                .await?,
            ),
            // 无计量单位的类型：units 列留 NULL
            None => None,
        };

        let mut type_extra = Vec::new();
        if let Some(units_id) = units_id {
            type_extra.push(("units", SqlArg::Int(units_id)));
        }
        let type_id = self
            .resolve_level(
                LevelInsert {
                    table: TYPE_TABLE,
                    key: &sensor.type_name,
                    extra: type_extra,
                },
                &caches.types,
            )
            .await?;

        let sensor_id = self
            .resolve_level(
                LevelInsert {
                    table: SENSOR_TABLE,
                    key: &sensor.name,
                    extra: vec![("type", SqlArg::Int(type_id))],
                },
                &caches.sensors,
            )
            .await?;

        Ok(sensor_id)
    }

    /// 单层解析：冲突容忍插入 + 按名称回查 + 写穿缓存。
    ///
    /// 插入与回查不构成原子单元：并发注册同名时由唯一约束保证
    /// 其中一个插入退化为空操作，两侧回查收敛到同一 id。
    /// 回查为空视为一致性破坏，直接上抛，不重试。
    pub async fn resolve_level(
        &self,
        insert: LevelInsert<'_>,
        cache: &ReferenceCache,
    ) -> Result<i64, StorageError> {
        let dialect = self.backend.dialect();

        let mut columns = vec!["name"];
        let mut args = vec![SqlArg::Text(insert.key.to_string())];
        for (column, value) in insert.extra {
            columns.push(column);
            args.push(value);
        }

        let placeholders = (1..=columns.len())
            .map(|index| dialect.placeholder(index))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "{verb} INTO {table} ({columns}) VALUES ({placeholders}){suffix}",
            verb = dialect.insert_verb(),
            table = insert.table,
            columns = columns.join(", "),
            suffix = dialect.conflict_suffix(insert.table)?,
        );
        self.backend.execute(&sql, &args).await?;

        // 无论插入是否实际生效，都按名称回查唯一行
        let lookup = format!(
            "SELECT id FROM {table} WHERE name = {placeholder}",
            table = insert.table,
            placeholder = dialect.placeholder(1),
        );
        let id = self
            .backend
            .fetch_optional_id(&lookup, &[SqlArg::Text(insert.key.to_string())])
            .await?
            .ok_or_else(|| StorageError::MissingRow {
                table: insert.table.to_string(),
                name: insert.key.to_string(),
            })?;

        debug!(table = insert.table, name = insert.key, id, "resolved level");
        cache.put(insert.key, id);
        Ok(id)
    }
}
