//! 测量表追加写入

use crate::backend::{SqlArg, SqlBackend};
use crate::cache::ReferenceCache;
use crate::error::StorageError;
use domain::Measurement;

/// 测量写入器。
pub struct MeasurementWriter<'a, B: SqlBackend> {
    backend: &'a B,
}

impl<'a, B: SqlBackend> MeasurementWriter<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// 追加一条测量记录。
    ///
    /// 传感器 id 只从缓存解析：未注册即失败，不做隐式注册。
    /// (timestamp, sensor) 主键冲突映射为 `DuplicateMeasurement`，
    /// 不做 upsert，已存值保持不变。
    pub async fn store(
        &self,
        meas: &Measurement,
        sensors: &ReferenceCache,
    ) -> Result<(), StorageError> {
        let sensor_id = sensors
            .get(&meas.sensor_name)
            .ok_or_else(|| StorageError::UnregisteredSensor(meas.sensor_name.clone()))?;

        let dialect = self.backend.dialect();
        let sql = format!(
            "INSERT INTO measurement (timestamp, sensor, value) VALUES ({p1}, {p2}, {p3})",
            p1 = dialect.placeholder(1),
            p2 = dialect.placeholder(2),
            p3 = dialect.placeholder(3),
        );
        let args = [
            SqlArg::Text(meas.timestamp.clone()),
            SqlArg::Int(sensor_id),
            SqlArg::Real(meas.value),
        ];

        match self.backend.execute(&sql, &args).await {
            Ok(_) => Ok(()),
            Err(StorageError::Sql(err)) if is_unique_violation(&err) => {
                Err(StorageError::DuplicateMeasurement {
                    sensor: meas.sensor_name.clone(),
                    timestamp: meas.timestamp.clone(),
                })
            }
            Err(err) => Err(err),
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
