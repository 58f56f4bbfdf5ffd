//! 测量数据导入程序：从 stdin 逐行读取 JSON 注册/测量记录并入库。

mod ingest;

use ingest::IngestLine;
use sensorhub_config::AppConfig;
use sensorhub_storage::{PgConnector, SensorStore, SqliteConnector};
use sensorhub_telemetry::{init_tracing, metrics, new_run_id};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let run_id = new_run_id();
    info!(run_id = %run_id, "starting ingest");

    // 依据 URL scheme 选择后端；两个后端暴露一致的公开操作
    let store: Box<dyn SensorStore> = if config.database_url.starts_with("postgres") {
        let connector =
            PgConnector::connect(&config.database_url, config.max_connections).await?;
        connector.backend().ensure_schema().await?;
        Box::new(connector)
    } else {
        let connector =
            SqliteConnector::connect(&config.database_url, config.max_connections).await?;
        if config.reset_schema {
            // 测试库初始化：删表重建，清空已有数据
            connector.backend().reset_schema().await?;
        } else {
            connector.backend().ensure_schema().await?;
        }
        Box::new(connector)
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0u64;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed: IngestLine = match serde_json::from_str(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(line_no, %err, "skipping malformed line");
                continue;
            }
        };
        if let Err(err) = ingest::apply(store.as_ref(), parsed).await {
            error!(line_no, %err, "line failed");
        }
    }

    let snapshot = metrics().snapshot();
    info!(
        run_id = %run_id,
        sensors = snapshot.sensors_registered,
        written = snapshot.measurements_written,
        failed = snapshot.write_failure,
        duplicates = snapshot.dropped_duplicate,
        unregistered = snapshot.dropped_unregistered,
        "ingest finished"
    );
    Ok(())
}
