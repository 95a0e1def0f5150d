//! 收藏数据模型
//!
//! 收藏有两种形式：
//! - 纯文本：文本本身就是唯一标识
//! - 结构化记录：`{id, text, category, timestamp, language}`，以 `id` 为唯一标识
//!
//! 两者都实现 [`Favorite`]，收藏存储对具体形式无感知。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 可被收藏存储管理的条目
pub trait Favorite: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 去重使用的唯一标识
    fn identity(&self) -> &str;

    /// 展示 / 复制用的文本
    fn text(&self) -> &str;

    /// 宽松解析存储中的单个元素
    ///
    /// 旧数据可能是另一种形式，能转换就转换，无法识别时返回 `None`。
    fn from_stored(value: Value) -> Option<Self>;
}

impl Favorite for String {
    fn identity(&self) -> &str {
        self
    }

    fn text(&self) -> &str {
        self
    }

    fn from_stored(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text),
            Value::Object(map) => map
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }
}

/// 结构化收藏记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub category: String,
    /// 收藏时间（Unix 时间戳，毫秒）
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl FavoriteRecord {
    pub fn new(id: String, text: String, category: String, language: String) -> Self {
        Self {
            id,
            text,
            category,
            timestamp: chrono::Utc::now().timestamp_millis(),
            language,
        }
    }

    /// 由旧版纯文本收藏转换而来，文本同时作为 id
    pub fn from_legacy_text(text: String) -> Self {
        Self {
            id: text.clone(),
            text,
            category: String::new(),
            timestamp: 0,
            language: default_language(),
        }
    }
}

impl Favorite for FavoriteRecord {
    fn identity(&self) -> &str {
        &self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn from_stored(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::from_legacy_text(text)),
            other @ Value::Object(_) => serde_json::from_value(other).ok(),
            _ => None,
        }
    }
}
