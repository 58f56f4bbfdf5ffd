//! 存储接口 Trait 定义
//!
//! 两个后端暴露完全一致的公开操作；调用方只依赖本接口。

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{Measurement, Sensor};

/// 传感器测量存储接口。
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// 注册传感器：按依赖顺序创建或复用 units/type/sensor 行，
    /// 返回 sensor 层代理主键。
    ///
    /// 幂等：重复注册同名传感器返回同一 id，不产生重复行。
    /// 已知尖角：同名但 type 不同的再次注册不会更新既有关联，
    /// 新传入的 type/units 被静默忽略。
    async fn register_sensor(&self, sensor: &Sensor) -> Result<i64, StorageError>;

    /// 追加一条测量。传感器必须先经 `register_sensor` 解析；
    /// 重复 (timestamp, sensor) 返回 `DuplicateMeasurement`。
    async fn store_measurement(&self, meas: &Measurement) -> Result<(), StorageError>;
}
