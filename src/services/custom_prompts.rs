//! 自定义提示词管理
//!
//! 用户自己编写的提示词，与数据集无关，单独保存在 `custom_prompts` 键下，按创建时间倒序排列。
//!
//! 删除一条同时被收藏的提示词时，先移除收藏再删除记录，收藏里不会留下悬空文本。

use std::sync::Arc;

use journal_prompts_core::CustomPrompt;
use journal_prompts_infra::SharedStorage;
use parking_lot::RwLock;
use uuid::Uuid;

use super::favorites_store::TextFavorites;
use crate::error::{JournalError, Result};

pub const CUSTOM_PROMPTS_KEY: &str = "custom_prompts";

pub struct CustomPromptsManager {
    storage: SharedStorage,
    favorites: Arc<TextFavorites>,
    prompts: RwLock<Vec<CustomPrompt>>,
}

impl CustomPromptsManager {
    /// 从存储加载，数据缺失或损坏时从空列表开始
    pub fn load(storage: SharedStorage, favorites: Arc<TextFavorites>) -> Self {
        let prompts = match storage.get_item(CUSTOM_PROMPTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CustomPrompt>>(&raw) {
                Ok(mut prompts) => {
                    // 旧数据可能未排序
                    prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    prompts
                }
                Err(e) => {
                    tracing::warn!("[CustomPrompts] 解析失败，从空列表开始: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("[CustomPrompts] 读取失败，从空列表开始: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("[CustomPrompts] 加载了 {} 条自定义提示词", prompts.len());

        Self {
            storage,
            favorites,
            prompts: RwLock::new(prompts),
        }
    }

    /// 创建新提示词，放在列表最前
    pub fn create(&self, text: &str) -> Result<CustomPrompt> {
        let text = validate_text(text)?;
        let prompt = CustomPrompt::new(Uuid::new_v4().to_string(), text);

        let mut prompts = self.prompts.write();
        prompts.insert(0, prompt.clone());
        self.persist(&prompts)?;

        tracing::info!("[CustomPrompts] 创建: {}", prompt.id);
        Ok(prompt)
    }

    /// 修改文本，保留 id、创建时间和位置；原文本被收藏时收藏跟随新文本
    pub fn update(&self, id: &str, text: &str) -> Result<CustomPrompt> {
        let text = validate_text(text)?;

        let mut prompts = self.prompts.write();
        let prompt = prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("自定义提示词 {}", id)))?;

        let old_text = std::mem::replace(&mut prompt.text, text.clone());
        let updated = prompt.clone();
        self.persist(&prompts)?;
        drop(prompts);

        if old_text != text && self.favorites.replace(&old_text, text)? {
            tracing::debug!("[CustomPrompts] 收藏已跟随更新: {}", id);
        }

        tracing::info!("[CustomPrompts] 更新: {}", id);
        Ok(updated)
    }

    /// 删除提示词，先移除同文本的收藏
    pub fn delete(&self, id: &str) -> Result<CustomPrompt> {
        let mut prompts = self.prompts.write();
        let pos = prompts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("自定义提示词 {}", id)))?;

        if self.favorites.has(&prompts[pos].text) {
            self.favorites.remove(&prompts[pos].text)?;
            tracing::debug!("[CustomPrompts] 已移除对应收藏: {}", id);
        }

        let removed = prompts.remove(pos);
        self.persist(&prompts)?;

        tracing::info!("[CustomPrompts] 删除: {}", id);
        Ok(removed)
    }

    pub fn get(&self, id: &str) -> Option<CustomPrompt> {
        self.prompts.read().iter().find(|p| p.id == id).cloned()
    }

    /// 按创建时间倒序
    pub fn list(&self) -> Vec<CustomPrompt> {
        self.prompts.read().clone()
    }

    pub fn len(&self) -> usize {
        self.prompts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.read().is_empty()
    }

    fn persist(&self, prompts: &[CustomPrompt]) -> Result<()> {
        let json = serde_json::to_string(prompts)?;
        self.storage.set_item(CUSTOM_PROMPTS_KEY, &json)?;
        Ok(())
    }
}

fn validate_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(JournalError::Validation("提示词内容不能为空".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::favorites_store::FAVORITES_KEY;
    use journal_prompts_infra::{KeyValueStorage, MemoryStorage};

    fn setup() -> (SharedStorage, Arc<TextFavorites>, CustomPromptsManager) {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let favorites = Arc::new(TextFavorites::load(storage.clone(), FAVORITES_KEY));
        let manager = CustomPromptsManager::load(storage.clone(), favorites.clone());
        (storage, favorites, manager)
    }

    #[test]
    fn test_create_rejects_blank_text() {
        let (storage, _, manager) = setup();
        assert!(matches!(
            manager.create("   "),
            Err(JournalError::Validation(_))
        ));
        assert!(matches!(manager.create(""), Err(JournalError::Validation(_))));
        assert_eq!(manager.len(), 0);
        assert_eq!(storage.get_item(CUSTOM_PROMPTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_create_is_newest_first() {
        let (_, _, manager) = setup();
        let first = manager.create("first").unwrap();
        let second = manager.create("  second  ").unwrap();
        assert_eq!(second.text, "second");
        assert_ne!(first.id, second.id);

        let list = manager.list();
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[test]
    fn test_update_keeps_identity_and_order() {
        let (_, _, manager) = setup();
        let older = manager.create("older").unwrap();
        manager.create("newer").unwrap();

        let updated = manager.update(&older.id, "older, revised").unwrap();
        assert_eq!(updated.id, older.id);
        assert_eq!(updated.created_at, older.created_at);
        assert_eq!(manager.list()[1].text, "older, revised");

        assert!(matches!(
            manager.update(&older.id, " "),
            Err(JournalError::Validation(_))
        ));
        assert_eq!(manager.get(&older.id).unwrap().text, "older, revised");
        assert!(matches!(
            manager.update("missing", "x"),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_moves_favorite() {
        let (_, favorites, manager) = setup();
        let prompt = manager.create("before").unwrap();
        favorites.add("before".to_string()).unwrap();

        manager.update(&prompt.id, "after").unwrap();
        assert!(!favorites.has("before"));
        assert!(favorites.has("after"));
    }

    #[test]
    fn test_delete_cascades_to_favorites() {
        let (storage, favorites, manager) = setup();
        let prompt = manager.create("my own prompt").unwrap();
        favorites.add("my own prompt".to_string()).unwrap();
        favorites.add("other".to_string()).unwrap();

        manager.delete(&prompt.id).unwrap();
        assert!(manager.is_empty());
        assert_eq!(favorites.list(), vec!["other".to_string()]);

        // 重新加载后同样一致
        let reloaded_favorites = Arc::new(TextFavorites::load(storage.clone(), FAVORITES_KEY));
        assert!(!reloaded_favorites.has("my own prompt"));
        let reloaded = CustomPromptsManager::load(storage, reloaded_favorites);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_delete_unknown_id() {
        let (_, _, manager) = setup();
        assert!(matches!(
            manager.delete("nope"),
            Err(JournalError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_sorts_and_tolerates_corruption() {
        let (storage, favorites, _) = setup();
        storage
            .set_item(
                CUSTOM_PROMPTS_KEY,
                r#"[{"id":"a","text":"old","createdAt":1},{"id":"b","text":"new","createdAt":2}]"#,
            )
            .unwrap();
        let manager = CustomPromptsManager::load(storage.clone(), favorites.clone());
        let ids: Vec<String> = manager.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        storage.set_item(CUSTOM_PROMPTS_KEY, "not json").unwrap();
        assert!(CustomPromptsManager::load(storage, favorites).is_empty());
    }
}
