//! 应用状态
//!
//! 启动时按配置打开存储、执行迁移、加载各服务，之后通过 `&AppState` 传给命令层。

use std::sync::Arc;

use journal_prompts_infra::SharedStorage;

use crate::config::AppConfig;
use crate::database::{self, migration};
use crate::error::Result;
use crate::services::{
    ClipboardService, CustomPromptsManager, DatasetLoader, PreferencesService, PromptService,
    RecordFavorites, TextFavorites, FAVORITES_KEY, FAVORITE_RECORDS_KEY,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: SharedStorage,
    pub prompts: Arc<PromptService>,
    /// 提示词收藏（纯文本）
    pub favorites: Arc<TextFavorites>,
    /// 肯定语收藏（结构化记录）
    pub affirmation_favorites: Arc<RecordFavorites>,
    pub custom_prompts: Arc<CustomPromptsManager>,
    pub preferences: Arc<PreferencesService>,
    pub clipboard: Arc<ClipboardService>,
}

impl AppState {
    /// 打开存储并加载数据集
    pub async fn initialize(config: AppConfig) -> Result<Self> {
        let storage = database::open_storage(&config)?;
        let state = Self::with_storage(config, storage)?;
        state.prompts.initialize().await?;

        if state.prompts.is_degraded().await {
            tracing::warn!("[AppState] 数据集加载失败，当前使用内置回退数据集");
        }
        Ok(state)
    }

    /// 使用给定存储构建状态；数据集在第一次生成时加载
    pub fn with_storage(config: AppConfig, storage: SharedStorage) -> Result<Self> {
        if let Err(e) = migration::migrate_favorite_records(&storage) {
            tracing::error!("[AppState] 收藏迁移失败: {}", e);
        }

        let loader = DatasetLoader::from_config(&config.dataset)?;
        let prompts = PromptService::new(loader, &config.generation);

        let favorites = Arc::new(TextFavorites::load(storage.clone(), FAVORITES_KEY));
        let affirmation_favorites =
            Arc::new(RecordFavorites::load(storage.clone(), FAVORITE_RECORDS_KEY));
        let custom_prompts = CustomPromptsManager::load(storage.clone(), favorites.clone());
        let preferences = PreferencesService::load(storage.clone());

        tracing::info!(
            "[AppState] 初始化完成: {} 条收藏，{} 条自定义提示词",
            favorites.len(),
            custom_prompts.len()
        );

        Ok(Self {
            config: Arc::new(config),
            storage,
            prompts: Arc::new(prompts),
            favorites,
            affirmation_favorites,
            custom_prompts: Arc::new(custom_prompts),
            preferences: Arc::new(preferences),
            clipboard: Arc::new(ClipboardService::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use journal_prompts_infra::MemoryStorage;
    use tempfile::TempDir;

    #[test]
    fn test_with_storage_shares_favorites() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let state = AppState::with_storage(AppConfig::default(), storage).unwrap();

        let prompt = state.custom_prompts.create("mine").unwrap();
        state.favorites.add("mine".to_string()).unwrap();
        state.custom_prompts.delete(&prompt.id).unwrap();
        assert!(state.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_sqlite() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        config.storage.backend = StorageBackend::Sqlite;

        let state = AppState::initialize(config.clone()).await.unwrap();
        state.favorites.add("kept".to_string()).unwrap();
        assert!(dir.path().join("journal.db").exists());
        drop(state);

        let reopened = AppState::initialize(config).await.unwrap();
        assert!(reopened.favorites.has("kept"));
        assert!(!reopened.prompts.is_degraded().await);
    }
}
