//! 收藏存储
//!
//! 以唯一标识去重的收藏集合，整体序列化为 JSON 数组保存在固定键下。
//!
//! ## 持久化
//! - 创建时从存储加载，数据缺失或损坏时从空集合开始（只记录日志）
//! - 每次变更后整体写回
//! - 读取-修改-写回在同一把写锁内完成，连续多次变更不会互相覆盖
//! - 写回失败时内存中的变更保留，错误返回给调用方

use journal_prompts_core::{Favorite, FavoriteRecord};
use journal_prompts_infra::SharedStorage;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Result;

/// 纯文本收藏的存储键
pub const FAVORITES_KEY: &str = "affirmation_favorites";
/// 结构化收藏的存储键
pub const FAVORITE_RECORDS_KEY: &str = "affirmation_favorite_records";

pub struct FavoritesStore<T: Favorite> {
    storage: SharedStorage,
    key: String,
    items: RwLock<Vec<T>>,
}

/// 以文本为标识的收藏
pub type TextFavorites = FavoritesStore<String>;
/// 带 id、分类和时间戳的收藏
pub type RecordFavorites = FavoritesStore<FavoriteRecord>;

impl<T: Favorite> FavoritesStore<T> {
    /// 从存储加载
    pub fn load(storage: SharedStorage, key: &str) -> Self {
        let items = match storage.get_item(key) {
            Ok(Some(raw)) => parse_stored::<T>(key, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("[Favorites] 读取 {} 失败，从空集合开始: {}", key, e);
                Vec::new()
            }
        };

        tracing::debug!("[Favorites] {} 加载了 {} 条收藏", key, items.len());

        Self {
            storage,
            key: key.to_string(),
            items: RwLock::new(items),
        }
    }

    /// 添加收藏；已存在时不做任何事，返回 false
    pub fn add(&self, item: T) -> Result<bool> {
        let mut items = self.items.write();
        if items.iter().any(|f| f.identity() == item.identity()) {
            return Ok(false);
        }
        items.push(item);
        self.persist(&items)?;
        Ok(true)
    }

    /// 找到满足条件的收藏就返回它，否则用 `make` 生成一条并添加
    ///
    /// 查找和插入在同一把写锁内完成。返回值的第二项表示是否新增。
    pub fn find_or_add<F, M>(&self, matches: F, make: M) -> Result<(T, bool)>
    where
        F: Fn(&T) -> bool,
        M: FnOnce() -> T,
    {
        let mut items = self.items.write();
        if let Some(existing) = items.iter().find(|f| matches(f)) {
            return Ok((existing.clone(), false));
        }

        let item = make();
        if let Some(existing) = items.iter().find(|f| f.identity() == item.identity()) {
            return Ok((existing.clone(), false));
        }
        items.push(item.clone());
        self.persist(&items)?;
        Ok((item, true))
    }

    /// 移除收藏；不存在时返回 false，仍会写回
    pub fn remove(&self, identity: &str) -> Result<bool> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|f| f.identity() != identity);
        let removed = items.len() != before;
        self.persist(&items)?;
        Ok(removed)
    }

    pub fn clear(&self) -> Result<()> {
        let mut items = self.items.write();
        items.clear();
        self.persist(&items)?;
        tracing::info!("[Favorites] 已清空 {}", self.key);
        Ok(())
    }

    /// 切换收藏状态，返回切换后是否处于收藏中
    pub fn toggle(&self, item: T) -> Result<bool> {
        let mut items = self.items.write();
        let identity = item.identity().to_string();
        let favorited = if let Some(pos) = items.iter().position(|f| f.identity() == identity) {
            items.remove(pos);
            false
        } else {
            items.push(item);
            true
        };
        self.persist(&items)?;
        Ok(favorited)
    }

    /// 原位替换；`identity` 不存在时返回 false 且不写回
    ///
    /// 新条目的标识已被其它收藏占用时只删除旧条目。
    pub fn replace(&self, identity: &str, item: T) -> Result<bool> {
        let mut items = self.items.write();
        let Some(pos) = items.iter().position(|f| f.identity() == identity) else {
            return Ok(false);
        };

        let taken = items
            .iter()
            .enumerate()
            .any(|(i, f)| i != pos && f.identity() == item.identity());
        if taken {
            items.remove(pos);
        } else {
            items[pos] = item;
        }
        self.persist(&items)?;
        Ok(true)
    }

    pub fn has(&self, identity: &str) -> bool {
        self.items.read().iter().any(|f| f.identity() == identity)
    }

    pub fn get(&self, identity: &str) -> Option<T> {
        self.items
            .read()
            .iter()
            .find(|f| f.identity() == identity)
            .cloned()
    }

    pub fn list(&self) -> Vec<T> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn persist(&self, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }
}

/// 宽松解析：逐个元素转换，无法识别的元素跳过，重复标识只保留第一个
fn parse_stored<T: Favorite>(key: &str, raw: &str) -> Vec<T> {
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            tracing::warn!("[Favorites] {} 中的数据不是数组，从空集合开始", key);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("[Favorites] 解析 {} 失败，从空集合开始: {}", key, e);
            return Vec::new();
        }
    };

    let total = values.len();
    let mut items: Vec<T> = Vec::with_capacity(total);
    for value in values {
        let Some(item) = T::from_stored(value) else {
            continue;
        };
        if !items.iter().any(|f| f.identity() == item.identity()) {
            items.push(item);
        }
    }

    if items.len() < total {
        tracing::warn!(
            "[Favorites] {} 中有 {} 条无法识别或重复的收藏已跳过",
            key,
            total - items.len()
        );
    }
    items
}
