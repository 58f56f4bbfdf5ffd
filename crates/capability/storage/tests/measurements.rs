use domain::{Measurement, Sensor};
use sensorhub_storage::{SensorStore, SqliteConnector, StorageError};
use sqlx::SqlitePool;
use tempfile::TempDir;

fn db_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("measurements.db").display())
}

async fn sqlite_connector(dir: &TempDir) -> SqliteConnector {
    let connector = SqliteConnector::connect(&db_url(dir), 2)
        .await
        .expect("connect");
    connector.backend().ensure_schema().await.expect("schema");
    connector
}

async fn measurement_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM measurement")
        .fetch_one(pool)
        .await
        .expect("count")
}

async fn stored_value(pool: &SqlitePool, timestamp: &str) -> f64 {
    sqlx::query_scalar::<_, f64>("SELECT value FROM measurement WHERE timestamp = ?")
        .bind(timestamp)
        .fetch_one(pool)
        .await
        .expect("measurement row")
}

fn sample_sensor() -> Sensor {
    Sensor::new("tempA", "temperature", Some("celsius".to_string()))
}

#[tokio::test]
async fn end_to_end_measurement_stored() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let sensor_id = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("registration");
    connector
        .store_measurement(&Measurement::new("tempA", "t1", 20.0))
        .await
        .expect("measurement");

    let pool = &connector.backend().pool;
    for table in ["units", "type", "sensor", "measurement"] {
        let rows = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .expect("count");
        assert_eq!(rows, 1, "expected exactly one {table} row");
    }
    let value = stored_value(pool, "t1").await;
    assert!((value - 20.0).abs() < f64::EPSILON);

    // 重复注册不改变 sensor id
    let again = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("re-registration");
    assert_eq!(sensor_id, again);
}

#[tokio::test]
async fn duplicate_measurement_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    connector
        .register_sensor(&sample_sensor())
        .await
        .expect("registration");
    connector
        .store_measurement(&Measurement::new("tempA", "2017-03-28T10:00:00", 21.5))
        .await
        .expect("first measurement");

    let err = connector
        .store_measurement(&Measurement::new("tempA", "2017-03-28T10:00:00", 99.9))
        .await
        .expect_err("duplicate must fail");
    assert!(matches!(
        err,
        StorageError::DuplicateMeasurement { ref sensor, ref timestamp }
            if sensor == "tempA" && timestamp == "2017-03-28T10:00:00"
    ));

    let pool = &connector.backend().pool;
    assert_eq!(measurement_count(pool).await, 1);
    let value = stored_value(pool, "2017-03-28T10:00:00").await;
    assert!((value - 21.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn unregistered_sensor_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let err = connector
        .store_measurement(&Measurement::new("ghost", "2017-03-28T10:00:00", 1.0))
        .await
        .expect_err("unregistered must fail");
    assert!(matches!(err, StorageError::UnregisteredSensor(ref name) if name == "ghost"));
    assert_eq!(measurement_count(&connector.backend().pool).await, 0);
}

// 缓存只随连接器存活：重开连接器后必须重新注册才能写测量。
#[tokio::test]
async fn reopened_connector_requires_reregistration() {
    let dir = TempDir::new().expect("tempdir");
    let first = sqlite_connector(&dir).await;
    first
        .register_sensor(&sample_sensor())
        .await
        .expect("registration");
    first
        .store_measurement(&Measurement::new("tempA", "2017-03-28T10:00:00", 20.0))
        .await
        .expect("first measurement");
    drop(first);

    let second = sqlite_connector(&dir).await;
    let err = second
        .store_measurement(&Measurement::new("tempA", "2017-03-28T11:00:00", 20.5))
        .await
        .expect_err("cold cache must fail");
    assert!(matches!(err, StorageError::UnregisteredSensor(_)));

    // 幂等重注册回填缓存后写入成功
    second
        .register_sensor(&sample_sensor())
        .await
        .expect("re-registration");
    second
        .store_measurement(&Measurement::new("tempA", "2017-03-28T11:00:00", 20.5))
        .await
        .expect("second measurement");
    assert_eq!(measurement_count(&second.backend().pool).await, 2);
}
