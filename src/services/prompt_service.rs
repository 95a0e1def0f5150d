//! 提示词生成服务
//!
//! 持有已加载的数据集和选择器，对外提供异步生成接口。
//! 展示结果前有一段可配置的人为延迟，调用方可以通过 `CancellationToken`
//! 在延迟期间取消（例如界面已经关闭），取消后不会修改使用记录。

use std::sync::Arc;
use std::time::Duration;

use journal_prompts_core::PromptDataset;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::dataset_loader::DatasetLoader;
use super::prompt_selector::{PromptSelector, SelectorConfig, Selection};
use crate::config::GenerationConfig;
use crate::error::{JournalError, Result};

/// 已加载的数据集状态
struct LoadedState {
    selector: Arc<PromptSelector>,
    degraded: bool,
}

pub struct PromptService {
    loader: Option<DatasetLoader>,
    selector_config: SelectorConfig,
    default_count: usize,
    delay: Duration,
    state: RwLock<Option<LoadedState>>,
}

impl PromptService {
    pub fn new(loader: DatasetLoader, generation: &GenerationConfig) -> Self {
        Self {
            loader: Some(loader),
            selector_config: SelectorConfig::from(generation),
            default_count: generation.default_count.max(1),
            delay: Duration::from_millis(generation.delay_ms),
            state: RwLock::new(None),
        }
    }

    /// 使用现成的数据集（不再加载）
    pub fn with_dataset(dataset: PromptDataset, generation: &GenerationConfig) -> Self {
        let selector_config = SelectorConfig::from(generation);
        let selector = Arc::new(PromptSelector::new(Arc::new(dataset), selector_config.clone()));
        Self {
            loader: None,
            selector_config,
            default_count: generation.default_count.max(1),
            delay: Duration::from_millis(generation.delay_ms),
            state: RwLock::new(Some(LoadedState {
                selector,
                degraded: false,
            })),
        }
    }

    /// 加载数据集；已加载时跳过
    pub async fn initialize(&self) -> Result<()> {
        if self.state.read().await.is_some() {
            return Ok(());
        }
        self.reload().await
    }

    /// 重新加载数据集，同时清空使用记录
    pub async fn reload(&self) -> Result<()> {
        let Some(loader) = &self.loader else {
            if let Some(state) = self.state.read().await.as_ref() {
                state.selector.reset_usage();
            }
            return Ok(());
        };

        let loaded = loader.load().await;
        let selector = PromptSelector::new(Arc::new(loaded.dataset), self.selector_config.clone());

        let mut state = self.state.write().await;
        *state = Some(LoadedState {
            selector: Arc::new(selector),
            degraded: loaded.degraded,
        });
        Ok(())
    }

    async fn selector(&self) -> Result<Arc<PromptSelector>> {
        self.initialize().await?;
        self.state
            .read()
            .await
            .as_ref()
            .map(|state| state.selector.clone())
            .ok_or_else(|| JournalError::Internal("数据集未加载".to_string()))
    }

    /// 生成提示词
    ///
    /// `count` 为空时使用配置的默认数量。延迟期间被取消返回 `JournalError::Cancelled`。
    pub async fn generate(
        &self,
        goal: &str,
        journal_type: &str,
        count: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<Selection> {
        let selector = self.selector().await?;
        let count = count.unwrap_or(self.default_count);

        if !self.delay.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("[PromptService] 生成已取消: {} - {}", goal, journal_type);
                    return Err(JournalError::Cancelled);
                }
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
        if cancel.is_cancelled() {
            return Err(JournalError::Cancelled);
        }

        Ok(selector.select(goal, journal_type, count))
    }

    pub async fn dataset(&self) -> Result<Arc<PromptDataset>> {
        Ok(self.selector().await?.dataset().clone())
    }

    /// 数据集中的目标，保持文件顺序
    pub async fn goals(&self) -> Result<Vec<String>> {
        let dataset = self.dataset().await?;
        Ok(dataset.goals().into_iter().map(str::to_string).collect())
    }

    pub async fn types_for(&self, goal: &str) -> Result<Vec<String>> {
        let dataset = self.dataset().await?;
        Ok(dataset
            .types_for(goal)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// 当前数据集是否为回退数据集
    pub async fn is_degraded(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|state| state.degraded)
            .unwrap_or(false)
    }

    pub async fn used_prompts(&self, goal: &str, journal_type: &str) -> Result<Vec<String>> {
        Ok(self.selector().await?.used_prompts(goal, journal_type))
    }
}
