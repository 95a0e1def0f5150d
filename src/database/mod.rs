//! 存储初始化与数据迁移

pub mod migration;

use journal_prompts_infra::{MemoryStorage, SharedStorage, SqliteStorage};
use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::error::Result;

/// 按配置打开键值存储
pub fn open_storage(config: &AppConfig) -> Result<SharedStorage> {
    let storage: SharedStorage = match config.storage.backend {
        StorageBackend::Sqlite => {
            let path = config.db_path();
            tracing::info!("[Database] 打开数据库: {}", path.display());
            Arc::new(SqliteStorage::open(&path)?)
        }
        StorageBackend::Memory => {
            tracing::info!("[Database] 使用内存存储，数据不会保留");
            Arc::new(MemoryStorage::new())
        }
    };
    Ok(storage)
}
