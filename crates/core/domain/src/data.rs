/// 传感器注册描述。
///
/// `units` 为空表示该类型无计量单位（如无量纲计数）。
#[derive(Debug, Clone)]
pub struct Sensor {
    pub name: String,
    pub type_name: String,
    pub units: Option<String>,
}

impl Sensor {
    /// 构造传感器描述。
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        units: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            units,
        }
    }
}

/// 单条测量值。
///
/// `timestamp` 以文本形式存储（ISO 8601 约定），与数据库列类型一致；
/// 同一传感器同一时间戳至多一条。
#[derive(Debug, Clone)]
pub struct Measurement {
    pub sensor_name: String,
    pub timestamp: String,
    pub value: f64,
}

impl Measurement {
    /// 构造测量值。
    pub fn new(
        sensor_name: impl Into<String>,
        timestamp: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            sensor_name: sensor_name.into(),
            timestamp: timestamp.into(),
            value,
        }
    }
}
