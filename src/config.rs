//! 应用配置
//!
//! 从 YAML 文件加载，所有字段都有默认值，缺少配置文件时使用默认配置。
//! 默认配置文件路径: ~/.journal-prompts/config.yaml

use std::path::{Path, PathBuf};

use journal_prompts_core::data::GENERIC_FALLBACK_PROMPTS;
use journal_prompts_core::LoggerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, Result};

const APP_DIR_NAME: &str = ".journal-prompts";
const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据目录，默认 ~/.journal-prompts
    pub data_dir: Option<PathBuf>,
    pub dataset: DatasetConfig,
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// 数据集来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSourceKind {
    /// 编译进二进制的数据集
    #[default]
    Bundled,
    File,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub source: DatasetSourceKind,
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    /// 远程加载超时（秒）
    pub timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: DatasetSourceKind::Bundled,
            path: None,
            url: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// 每次生成的提示词数量
    pub default_count: usize,
    /// 展示结果前的人为延迟（毫秒），0 表示不延迟
    pub delay_ms: u64,
    /// 已使用记录达到题库的这个比例时压缩
    pub compact_ratio: f64,
    /// 压缩后保留题库的这个比例（最近使用的部分）
    pub retain_ratio: f64,
    /// 通用回退提示词，为空时改为拼句兜底
    pub fallback_prompts: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_count: 2,
            delay_ms: 1500,
            compact_ratio: 0.7,
            retain_ratio: 0.5,
            fallback_prompts: GENERIC_FALLBACK_PROMPTS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// 相对于数据目录的数据库文件名
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            db_file: "journal.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_logging: bool,
    pub retention_days: u32,
    pub max_file_size: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_logging: false,
            retention_days: 7,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn default_config_path() -> PathBuf {
        default_app_dir().join(CONFIG_FILE_NAME)
    }

    /// 加载配置
    ///
    /// 显式指定的文件不存在时报错；默认路径不存在时使用默认配置。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(JournalError::Config(format!("配置文件不存在: {:?}", path)));
            }
            tracing::debug!("[Config] 未找到配置文件，使用默认配置");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| JournalError::Config(format!("读取配置文件失败: {}", e)))?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!("[Config] 已加载配置文件: {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| JournalError::Config(format!("解析配置文件失败: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        if generation.default_count == 0 {
            return Err(JournalError::Config(
                "generation.default_count 必须大于 0".to_string(),
            ));
        }
        for (name, ratio) in [
            ("compact_ratio", generation.compact_ratio),
            ("retain_ratio", generation.retain_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(JournalError::Config(format!(
                    "generation.{} 必须在 (0, 1] 范围内: {}",
                    name, ratio
                )));
            }
        }
        match self.dataset.source {
            DatasetSourceKind::File if self.dataset.path.is_none() => Err(JournalError::Config(
                "dataset.source 为 file 时必须设置 dataset.path".to_string(),
            )),
            DatasetSourceKind::Url if self.dataset.url.is_none() => Err(JournalError::Config(
                "dataset.source 为 url 时必须设置 dataset.url".to_string(),
            )),
            _ => Ok(()),
        }
    }

    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_app_dir)
    }

    pub fn db_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.storage.db_file)
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.logging.level.clone(),
            enable_file_logging: self.logging.file_logging,
            log_dir: self.resolved_data_dir().join("logs"),
            retention_days: self.logging.retention_days,
            max_file_size: self.logging.max_file_size,
        }
    }
}

fn default_app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.generation.default_count, 2);
        assert_eq!(config.generation.delay_ms, 1500);
        assert_eq!(config.generation.fallback_prompts.len(), 6);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.dataset.source, DatasetSourceKind::Bundled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
data_dir: /tmp/journal
generation:
  default_count: 3
  delay_ms: 0
storage:
  backend: memory
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.generation.default_count, 3);
        assert_eq!(config.generation.delay_ms, 0);
        assert_eq!(config.generation.compact_ratio, 0.7);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/journal/journal.db"));
        assert_eq!(
            config.logger_config().log_dir,
            PathBuf::from("/tmp/journal/logs")
        );
    }

    #[test]
    fn test_validation_errors() {
        assert!(AppConfig::from_yaml("generation:\n  default_count: 0\n").is_err());
        assert!(AppConfig::from_yaml("generation:\n  compact_ratio: 1.5\n").is_err());
        assert!(AppConfig::from_yaml("generation:\n  retain_ratio: 0\n").is_err());
        assert!(AppConfig::from_yaml("dataset:\n  source: file\n").is_err());
        assert!(AppConfig::from_yaml("dataset:\n  source: url\n").is_err());
        assert!(AppConfig::from_yaml("storage:\n  backend: redis\n").is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(JournalError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "logging:\n  level: debug\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.logging.level, "debug");
    }
}
