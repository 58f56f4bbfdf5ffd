//! 名称到代理主键的进程内缓存

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::error;

/// 单个层级（units/type/sensor）的名称 → id 缓存。
///
/// 由连接器独占持有，随连接器存活，从不淘汰，也不跨实例共享；
/// 连接器重启后从空缓存开始，由注册路径重新回查数据库填充。
pub struct ReferenceCache {
    level: &'static str,
    ids: RwLock<HashMap<String, i64>>,
}

impl ReferenceCache {
    /// 创建指定层级的空缓存。
    pub fn new(level: &'static str) -> Self {
        Self {
            level,
            ids: RwLock::new(HashMap::new()),
        }
    }

    /// 查询名称对应的 id。
    pub fn get(&self, name: &str) -> Option<i64> {
        self.ids.read().ok().and_then(|ids| ids.get(name).copied())
    }

    /// 写入一次解析结果。
    ///
    /// 同名不同 id 属于程序错误：记录 error 日志并保留先写入的映射，
    /// 绝不静默覆盖。
    pub fn put(&self, name: &str, id: i64) {
        let Ok(mut ids) = self.ids.write() else {
            return;
        };
        match ids.get(name) {
            Some(existing) if *existing != id => {
                error!(
                    level = self.level,
                    name,
                    existing = *existing,
                    rejected = id,
                    "conflicting id for cached name; keeping first mapping"
                );
            }
            Some(_) => {}
            None => {
                ids.insert(name.to_string(), id);
            }
        }
    }

    /// 当前缓存条目数（用于测试）。
    pub fn len(&self) -> usize {
        self.ids.read().map(|ids| ids.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
