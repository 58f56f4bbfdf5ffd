use domain::Sensor;
use sensorhub_storage::{SensorStore, SqliteConnector};
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

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count")
}

fn sample_sensor() -> Sensor {
    Sensor::new("tempA", "temperature", Some("celsius".to_string()))
}

#[tokio::test]
async fn register_twice_is_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let first = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("first registration");
    let second = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("second registration");

    assert_eq!(first, second);
    let pool = &connector.backend().pool;
    assert_eq!(count(pool, "units").await, 1);
    assert_eq!(count(pool, "type").await, 1);
    assert_eq!(count(pool, "sensor").await, 1);
}

#[tokio::test]
async fn chain_created_in_dependency_order() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let sensor_id = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("registration");

    let pool = &connector.backend().pool;
    let units_id = sqlx::query_scalar::<_, i64>("SELECT id FROM units WHERE name = ?")
        .bind("celsius")
        .fetch_one(pool)
        .await
        .expect("units row");
    let (type_id, type_units) =
        sqlx::query_as::<_, (i64, Option<i64>)>("SELECT id, units FROM type WHERE name = ?")
            .bind("temperature")
            .fetch_one(pool)
            .await
            .expect("type row");
    let (stored_sensor_id, sensor_type) =
        sqlx::query_as::<_, (i64, i64)>("SELECT id, type FROM sensor WHERE name = ?")
            .bind("tempA")
            .fetch_one(pool)
            .await
            .expect("sensor row");

    assert_eq!(type_units, Some(units_id));
    assert_eq!(sensor_type, type_id);
    assert_eq!(stored_sensor_id, sensor_id);
}

#[tokio::test]
async fn cache_matches_database() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let sensor_id = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("registration");

    let stored = sqlx::query_scalar::<_, i64>("SELECT id FROM sensor WHERE name = ?")
        .bind("tempA")
        .fetch_one(&connector.backend().pool)
        .await
        .expect("sensor row");

    assert_eq!(connector.caches().sensors.get("tempA"), Some(stored));
    assert_eq!(sensor_id, stored);
    assert_eq!(connector.caches().units.len(), 1);
    assert_eq!(connector.caches().types.len(), 1);
}

#[tokio::test]
async fn type_without_units_persists_null() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let sensor = Sensor::new("counterA", "event_count", None);
    connector
        .register_sensor(&sensor)
        .await
        .expect("registration");

    let pool = &connector.backend().pool;
    assert_eq!(count(pool, "units").await, 0);
    let type_units = sqlx::query_scalar::<_, Option<i64>>("SELECT units FROM type WHERE name = ?")
        .bind("event_count")
        .fetch_one(pool)
        .await
        .expect("type row");
    assert_eq!(type_units, None);
    assert!(connector.caches().units.is_empty());
}

// 已知尖角：同名传感器换 type 再注册不会更新既有关联。
#[tokio::test]
async fn reregistration_with_different_type_keeps_original() {
    let dir = TempDir::new().expect("tempdir");
    let connector = sqlite_connector(&dir).await;

    let first = connector
        .register_sensor(&sample_sensor())
        .await
        .expect("first registration");
    let changed = Sensor::new("tempA", "humidity", Some("percent".to_string()));
    let second = connector
        .register_sensor(&changed)
        .await
        .expect("second registration");

    assert_eq!(first, second);

    let pool = &connector.backend().pool;
    // 新的 type/units 行照常创建，但 sensor 行保持原 type 关联
    assert_eq!(count(pool, "type").await, 2);
    let original_type = sqlx::query_scalar::<_, i64>("SELECT id FROM type WHERE name = ?")
        .bind("temperature")
        .fetch_one(pool)
        .await
        .expect("type row");
    let sensor_type = sqlx::query_scalar::<_, i64>("SELECT type FROM sensor WHERE name = ?")
        .bind("tempA")
        .fetch_one(pool)
        .await
        .expect("sensor row");
    assert_eq!(sensor_type, original_type);
    assert_eq!(count(pool, "sensor").await, 1);
}

#[tokio::test]
async fn fresh_connector_requeries_database() {
    let dir = TempDir::new().expect("tempdir");
    let first = sqlite_connector(&dir).await;
    let first_id = first
        .register_sensor(&sample_sensor())
        .await
        .expect("first registration");
    drop(first);

    // 新连接器从空缓存开始，注册路径回查数据库而非另建行
    let second = sqlite_connector(&dir).await;
    assert!(second.caches().sensors.is_empty());
    let second_id = second
        .register_sensor(&sample_sensor())
        .await
        .expect("re-registration");

    assert_eq!(first_id, second_id);
    let pool = &second.backend().pool;
    assert_eq!(count(pool, "units").await, 1);
    assert_eq!(count(pool, "type").await, 1);
    assert_eq!(count(pool, "sensor").await, 1);
}
