//! 导入行解析与分发。

use domain::{Measurement, Sensor};
use sensorhub_storage::{SensorStore, StorageError};
use serde::Deserialize;
use tracing::debug;

/// stdin 单行 JSON 的两种形态。
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IngestLine {
    /// {"op":"register","name":"tempA","type":"temperature","units":"celsius"}
    Register {
        name: String,
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        units: Option<String>,
    },
    /// {"op":"measure","sensor":"tempA","timestamp":"2017-03-28T10:00:00","value":21.5}
    Measure {
        sensor: String,
        timestamp: String,
        value: f64,
    },
}

/// 应用一行记录并维护导入计数；错误上抛由调用方记录日志。
pub async fn apply(store: &dyn SensorStore, line: IngestLine) -> Result<(), StorageError> {
    match line {
        IngestLine::Register {
            name,
            type_name,
            units,
        } => {
            let sensor = Sensor::new(name, type_name, units);
            match store.register_sensor(&sensor).await {
                Ok(sensor_id) => {
                    sensorhub_telemetry::record_sensor_registered();
                    debug!(sensor = %sensor.name, sensor_id, "sensor registered");
                    Ok(())
                }
                Err(err) => {
                    sensorhub_telemetry::record_write_failure();
                    Err(err)
                }
            }
        }
        IngestLine::Measure {
            sensor,
            timestamp,
            value,
        } => {
            let meas = Measurement::new(sensor, timestamp, value);
            match store.store_measurement(&meas).await {
                Ok(()) => {
                    sensorhub_telemetry::record_measurement_written();
                    Ok(())
                }
                Err(err @ StorageError::DuplicateMeasurement { .. }) => {
                    sensorhub_telemetry::record_dropped_duplicate();
                    Err(err)
                }
                Err(err @ StorageError::UnregisteredSensor(_)) => {
                    sensorhub_telemetry::record_dropped_unregistered();
                    Err(err)
                }
                Err(err) => {
                    sensorhub_telemetry::record_write_failure();
                    Err(err)
                }
            }
        }
    }
}
