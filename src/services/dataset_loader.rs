//! 提示词数据集加载
//!
//! 支持三种来源：内置（编译进二进制）、本地文件、远程 URL。
//! 任何一步失败都不会向上抛出，而是记录日志后换成内置的小型回退数据集，
//! 生成流程继续使用降级内容。

use std::path::PathBuf;
use std::time::Duration;

use journal_prompts_core::data::{bundled_dataset_json, fallback_dataset};
use journal_prompts_core::PromptDataset;

use crate::config::{DatasetConfig, DatasetSourceKind};
use crate::error::{JournalError, Result};

/// 数据集来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        match config.source {
            DatasetSourceKind::Bundled => Ok(Self::Bundled),
            DatasetSourceKind::File => config
                .path
                .clone()
                .map(Self::File)
                .ok_or_else(|| JournalError::Config("未设置 dataset.path".to_string())),
            DatasetSourceKind::Url => config
                .url
                .clone()
                .map(Self::Url)
                .ok_or_else(|| JournalError::Config("未设置 dataset.url".to_string())),
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: PromptDataset,
    /// 是否使用了回退数据集
    pub degraded: bool,
}

pub struct DatasetLoader {
    source: DatasetSource,
    timeout: Duration,
}

impl DatasetLoader {
    pub fn new(source: DatasetSource, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn from_config(config: &DatasetConfig) -> Result<Self> {
        Ok(Self::new(
            DatasetSource::from_config(config)?,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// 加载数据集，失败时回退到内置的小型数据集
    pub async fn load(&self) -> LoadedDataset {
        match self.try_load().await {
            Ok(dataset) => {
                tracing::info!(
                    "[DatasetLoader] 从 {} 加载了 {} 个目标, {} 条提示词",
                    self.source,
                    dataset.journal_goals.len(),
                    dataset.total_prompts()
                );
                LoadedDataset {
                    dataset,
                    degraded: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "[DatasetLoader] 从 {} 加载数据集失败，使用回退数据集: {}",
                    self.source,
                    e
                );
                LoadedDataset {
                    dataset: fallback_dataset(),
                    degraded: true,
                }
            }
        }
    }

    /// 加载并校验，不做回退
    pub async fn try_load(&self) -> Result<PromptDataset> {
        let content = match &self.source {
            DatasetSource::Bundled => bundled_dataset_json().to_string(),
            DatasetSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| JournalError::Dataset(format!("读取 {:?} 失败: {}", path, e)))?,
            DatasetSource::Url(url) => self.fetch(url).await?,
        };

        parse_dataset(&content)
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| JournalError::Dataset(format!("创建 HTTP 客户端失败: {}", e)))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| JournalError::Dataset(format!("请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalError::Dataset(format!("HTTP 状态码: {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| JournalError::Dataset(format!("读取响应失败: {}", e)))?;
        tracing::debug!("[DatasetLoader] 响应长度: {}", text.len());
        Ok(text)
    }
}

/// 解析数据集 JSON
///
/// 格式错误的单个目标或类型只会被丢弃，题库内重复的提示词合并为一条。
/// 整理后为空视为错误，由调用方回退。
pub fn parse_dataset(content: &str) -> Result<PromptDataset> {
    let mut dataset = PromptDataset::from_json(content)
        .map_err(|e| JournalError::Dataset(format!("解析 JSON 失败: {}", e)))?;

    let stats = dataset.normalize();
    if stats.empty_buckets > 0 {
        tracing::warn!("[DatasetLoader] 丢弃了 {} 个空题库", stats.empty_buckets);
    }
    if stats.duplicate_prompts > 0 {
        tracing::warn!("[DatasetLoader] 合并了 {} 条重复提示词", stats.duplicate_prompts);
    }

    if dataset.is_empty() {
        return Err(JournalError::Dataset("数据集中没有任何提示词".to_string()));
    }
    Ok(dataset)
}
