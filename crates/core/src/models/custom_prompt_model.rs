//! 自定义提示词数据模型

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrompt {
    pub id: String,
    pub text: String,
    /// 创建时间（Unix 时间戳，毫秒）
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl CustomPrompt {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
