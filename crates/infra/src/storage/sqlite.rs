//! SQLite 键值存储
//!
//! 使用单表 `kv_store` 保存所有槽位。
//!
//! ## 功能
//! - 键值的读取、覆盖写入、删除
//! - 记录每个键的最后更新时间

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyValueStorage, StorageError};

/// 共享数据库连接
pub type DbConnection = Arc<Mutex<Connection>>;

/// SQLite 键值存储
pub struct SqliteStorage {
    db: DbConnection,
}

impl SqliteStorage {
    /// 打开（或创建）数据库文件并初始化表
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("无法创建目录 {:?}: {}", parent, e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StorageError::Database(format!("打开数据库失败: {}", e)))?;

        tracing::info!("[KvStore] 打开数据库: {:?}", path);
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Database(format!("打开内存数据库失败: {}", e)))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 使用已有连接
    pub fn from_connection(db: DbConnection) -> Result<Self, StorageError> {
        let storage = Self { db };
        storage.init_tables()?;
        Ok(storage)
    }

    /// 创建 kv_store 表（如果不存在）
    fn init_tables(&self) -> Result<(), StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| StorageError::Database(format!("创建表失败: {}", e)))?;

        tracing::debug!("[KvStore] 数据库表初始化完成");
        Ok(())
    }

    /// 键的最后更新时间（Unix 时间戳，毫秒）
    pub fn updated_at(&self, key: &str) -> Result<Option<i64>, StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        conn.query_row(
            "SELECT updated_at FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Database(format!("查询失败: {}", e)))
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StorageError::Database(format!("读取 {} 失败: {}", key, e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().timestamp_millis()],
        )
        .map_err(|e| StorageError::Database(format!("写入 {} 失败: {}", key, e)))?;

        tracing::debug!("[KvStore] 写入: {} ({} 字节)", key, value.len());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::Database(format!("删除 {} 失败: {}", key, e)))?;

        tracing::debug!("[KvStore] 删除: {}", key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self
            .db
            .lock()
            .map_err(|e| StorageError::Database(format!("无法获取数据库锁: {}", e)))?;

        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(|e| StorageError::Database(format!("准备查询失败: {}", e)))?;

        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StorageError::Database(format!("查询失败: {}", e)))?
            .collect::<Result<Vec<String>, _>>()
            .map_err(|e| StorageError::Database(format!("读取失败: {}", e)))?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_sqlite_storage_crud() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert_eq!(storage.get_item("favorites").unwrap(), None);

        storage.set_item("favorites", "[\"a\"]").unwrap();
        assert_eq!(
            storage.get_item("favorites").unwrap(),
            Some("[\"a\"]".to_string())
        );
        assert!(storage.updated_at("favorites").unwrap().is_some());

        storage.set_item("favorites", "[]").unwrap();
        assert_eq!(storage.get_item("favorites").unwrap(), Some("[]".to_string()));

        storage.remove_item("favorites").unwrap();
        assert_eq!(storage.get_item("favorites").unwrap(), None);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("journal.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set_item("custom_prompts", "[]").unwrap();
            storage.set_item("user_preferences", "{}").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(
            storage.keys().unwrap(),
            vec!["custom_prompts", "user_preferences"]
        );
        assert_eq!(
            storage.get_item("user_preferences").unwrap(),
            Some("{}".to_string())
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(String, String),
        Remove(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[a-d]{1,2}", "[ -~]{0,16}").prop_map(|(k, v)| Op::Set(k, v)),
            "[a-d]{1,2}".prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// 任意操作序列下 SQLite 与内存实现的结果一致
        #[test]
        fn prop_sqlite_matches_memory(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let sqlite = SqliteStorage::open_in_memory().unwrap();
            let memory = MemoryStorage::new();

            for op in &ops {
                match op {
                    Op::Set(key, value) => {
                        sqlite.set_item(key, value).unwrap();
                        memory.set_item(key, value).unwrap();
                    }
                    Op::Remove(key) => {
                        sqlite.remove_item(key).unwrap();
                        memory.remove_item(key).unwrap();
                    }
                }
            }

            let keys = memory.keys().unwrap();
            prop_assert_eq!(sqlite.keys().unwrap(), keys.clone());
            for key in keys {
                prop_assert_eq!(sqlite.get_item(&key).unwrap(), memory.get_item(&key).unwrap());
            }
        }
    }
}
