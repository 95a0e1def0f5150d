//! 基础设施模块
//!
//! 包含独立的基础设施组件，不依赖业务逻辑：
//! - storage: 持久化键值存储（SQLite / 内存）

pub mod storage;

// 重新导出常用类型
pub use storage::{
    DbConnection, KeyValueStorage, MemoryStorage, SharedStorage, SqliteStorage, StorageError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
