//! 持久化键值存储
//!
//! 每个逻辑槽位（收藏、自定义提示词、用户偏好）以固定键名保存一段 JSON 文本。
//! 读取发生在服务初始化时，写入发生在每次变更之后。
//!
//! ## 模块结构
//! - `memory` - 进程内存储，用于测试和临时会话
//! - `sqlite` - SQLite 存储，默认的持久化后端

pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use thiserror::Error;

pub use memory::MemoryStorage;
pub use sqlite::{DbConnection, SqliteStorage};

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StorageError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(String),

    /// 文件系统错误
    #[error("文件系统错误: {0}")]
    Io(String),
}

impl From<StorageError> for String {
    fn from(err: StorageError) -> Self {
        err.to_string()
    }
}

/// 键值存储接口
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 覆盖写入
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键，键不存在时不报错
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// 所有键，按字典序
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

pub type SharedStorage = Arc<dyn KeyValueStorage>;
