//! 后端连接器
//!
//! 同一套解析/写入算法按后端能力参数化，两个后端各自实例化，
//! 不复制算法本身。

use crate::backend::SqlBackend;
use crate::error::StorageError;
use crate::postgres::PgBackend;
use crate::resolver::{HierarchicalResolver, LevelCaches};
use crate::sqlite::SqliteBackend;
use crate::traits::SensorStore;
use crate::writer::MeasurementWriter;
use domain::{Measurement, Sensor};

/// 泛型连接器：持有后端与各层级 id 缓存。
///
/// 缓存为本连接器独占，随连接器存活；跨连接器（含跨进程）并发
/// 注册的正确性完全依赖数据库唯一约束，而非任何进程内锁。
pub struct DbConnector<B: SqlBackend> {
    backend: B,
    caches: LevelCaches,
}

impl<B: SqlBackend> DbConnector<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            caches: LevelCaches::new(),
        }
    }

    /// 底层后端（模式管理与测试用）。
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 各层级 id 缓存（测试用）。
    pub fn caches(&self) -> &LevelCaches {
        &self.caches
    }
}

#[async_trait::async_trait]
impl<B: SqlBackend> SensorStore for DbConnector<B> {
    async fn register_sensor(&self, sensor: &Sensor) -> Result<i64, StorageError> {
        let resolver = HierarchicalResolver::new(&self.backend);
        resolver.resolve_sensor(sensor, &self.caches).await
    }

    async fn store_measurement(&self, meas: &Measurement) -> Result<(), StorageError> {
        let writer = MeasurementWriter::new(&self.backend);
        writer.store(meas, &self.caches.sensors).await
    }
}

/// 嵌入式 SQLite 连接器。
pub type SqliteConnector = DbConnector<SqliteBackend>;

/// PostgreSQL 连接器。
pub type PgConnector = DbConnector<PgBackend>;

impl SqliteConnector {
    /// 通过数据库 URL 建立嵌入式后端连接器。
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let backend = SqliteBackend::connect(database_url, max_connections).await?;
        Ok(Self::new(backend))
    }
}

impl PgConnector {
    /// 通过数据库 URL 建立 PostgreSQL 连接器。
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let backend = PgBackend::connect(database_url, max_connections).await?;
        Ok(Self::new(backend))
    }
}
