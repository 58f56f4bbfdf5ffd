//! 存储层错误类型定义

/// 存储错误
///
/// 同级名称重复不在此列：units/type/sensor 的重名注册按设计被
/// 冲突容忍插入静默吸收，只有测量重复会作为错误上抛。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// 无法建立数据库连接（致命，不重试）
    #[error("connection error: {0}")]
    Connection(String),

    /// SQL 执行错误
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    /// 写测量时传感器尚未注册
    #[error("sensor not registered: {0}")]
    UnregisteredSensor(String),

    /// 同一传感器同一时间戳的重复测量
    #[error("duplicate measurement for sensor {sensor} at {timestamp}")]
    DuplicateMeasurement { sensor: String, timestamp: String },

    /// 插入后按名称查不到行（一致性破坏，致命，不重试）
    #[error("no {table} row found for name {name} after insert")]
    MissingRow { table: String, name: String },

    /// 方言配置中没有该表的唯一约束名
    #[error("no unique constraint registered for table {0}")]
    UnknownConstraint(String),
}
