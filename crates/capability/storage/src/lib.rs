//! # SensorHub Storage 模块
//!
//! 本模块把时序传感器测量写入规范化的关系模式：
//! `units` → `type` → `sensor` → `measurement` 四张表由外键链连接，
//! 前三级按名称唯一，`measurement` 以 (timestamp, sensor) 为主键。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`SensorStore` 公开操作接口
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **连接管理层** (`connection.rs`)：两种后端的连接池构建
//! 4. **核心解析层**：
//!    - `cache.rs`：名称 → 代理主键的进程内缓存（每层级一个实例）
//!    - `resolver.rs`：层级引用解析（冲突容忍插入 + 按名称回查）
//!    - `writer.rs`：测量表追加写入
//! 5. **方言与后端**：
//!    - `dialect.rs`：占位符与唯一键冲突语法的方言能力
//!    - `backend.rs`：参数化语句执行能力接口
//!    - `sqlite/`：嵌入式文件后端（`INSERT OR IGNORE`）
//!    - `postgres/`：客户端/服务器后端（`ON CONFLICT ON CONSTRAINT ... DO NOTHING`）
//!
//! ## 核心语义
//!
//! - **幂等注册**：重复注册同名传感器不报错、不产生重复行，
//!   并解析到同一代理主键；同级名称冲突被数据库唯一约束静默吸收。
//! - **依赖顺序**：行的创建严格按 units → type → sensor 的外键顺序，
//!   每级的插入与回查各自独立提交，不包成一个多级事务。
//! - **缓存一致**：id 一经解析即写穿缓存；缓存条目随连接器存活，
//!   从不淘汰，且必须与数据库中该名称实际存储的 id 一致。
//! - **测量守卫**：写测量只信缓存，未注册的传感器直接报错；
//!   重复 (timestamp, sensor) 由主键约束拒绝，不做 upsert。
//!
//! ## 并发模型
//!
//! 插入与回查不要求原子：多个连接器（含跨进程）并发注册同名时，
//! 其中一个插入退化为空操作，两侧回查收敛到同一 id。
//! 正确性完全依赖数据库唯一约束与语句级提交，本模块不加任何锁、
//! 不做任何重试。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use domain::{Measurement, Sensor};
//! use sensorhub_storage::{SensorStore, SqliteConnector};
//!
//! let connector = SqliteConnector::connect("sqlite:measurements.db", 8).await?;
//! connector.backend().ensure_schema().await?;
//!
//! let sensor = Sensor::new("tempA", "temperature", Some("celsius".to_string()));
//! let sensor_id = connector.register_sensor(&sensor).await?;
//!
//! let meas = Measurement::new("tempA", "2017-03-28T10:00:00", 21.5);
//! connector.store_measurement(&meas).await?;
//! ```

pub mod backend;
pub mod cache;
pub mod connection;
pub mod connector;
pub mod dialect;
pub mod error;
pub mod postgres;
pub mod resolver;
pub mod sqlite;
pub mod traits;
pub mod writer;

pub use backend::*;
pub use cache::*;
pub use connection::*;
pub use connector::*;
pub use dialect::*;
pub use error::*;
pub use resolver::*;
pub use traits::*;
pub use writer::*;

// 导出两个后端类型到 crate 根目录，方便外部引用
pub use postgres::PgBackend;
pub use sqlite::SqliteBackend;
