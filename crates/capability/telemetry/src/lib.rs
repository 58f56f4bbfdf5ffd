//! 追踪初始化与导入计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础计数快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub sensors_registered: u64,
    pub measurements_written: u64,
    pub write_failure: u64,
    pub dropped_duplicate: u64,
    pub dropped_unregistered: u64,
}

/// 导入过程基础计数。
pub struct TelemetryMetrics {
    sensors_registered: AtomicU64,
    measurements_written: AtomicU64,
    write_failure: AtomicU64,
    dropped_duplicate: AtomicU64,
    dropped_unregistered: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            sensors_registered: AtomicU64::new(0),
            measurements_written: AtomicU64::new(0),
            write_failure: AtomicU64::new(0),
            dropped_duplicate: AtomicU64::new(0),
            dropped_unregistered: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sensors_registered: self.sensors_registered.load(Ordering::Relaxed),
            measurements_written: self.measurements_written.load(Ordering::Relaxed),
            write_failure: self.write_failure.load(Ordering::Relaxed),
            dropped_duplicate: self.dropped_duplicate.load(Ordering::Relaxed),
            dropped_unregistered: self.dropped_unregistered.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成本次导入会话的 run_id。
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录传感器注册（含幂等重复注册）次数。
pub fn record_sensor_registered() {
    metrics().sensors_registered.fetch_add(1, Ordering::Relaxed);
}

/// 记录测量写入成功次数。
pub fn record_measurement_written() {
    metrics().measurements_written.fetch_add(1, Ordering::Relaxed);
}

/// 记录写入失败次数。
pub fn record_write_failure() {
    metrics().write_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录重复测量被拒次数。
pub fn record_dropped_duplicate() {
    metrics().dropped_duplicate.fetch_add(1, Ordering::Relaxed);
}

/// 记录未注册传感器被拒次数。
pub fn record_dropped_unregistered() {
    metrics().dropped_unregistered.fetch_add(1, Ordering::Relaxed);
}
