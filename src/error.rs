//! 应用错误类型
//!
//! ## 分类
//! - 数据缺失：不会出现在这里，选择器总是回退到备用内容
//! - 存储错误：读取时宽松处理（记录日志后从空集合开始），写入失败才会返回
//! - 输入校验错误：直接返回给调用方，不修改任何状态
//! - 数据集加载错误：加载器内部回退到内置数据集，只记录日志

use journal_prompts_infra::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    /// 输入校验失败
    #[error("输入无效: {0}")]
    Validation(String),

    /// 记录不存在
    #[error("记录不存在: {0}")]
    NotFound(String),

    /// 存储错误
    #[error("存储错误: {0}")]
    Storage(String),

    /// 序列化失败
    #[error("序列化失败: {0}")]
    Serialization(String),

    /// 数据集加载失败
    #[error("数据集加载失败: {0}")]
    Dataset(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 操作已取消
    #[error("操作已取消")]
    Cancelled,

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, JournalError>;

impl From<StorageError> for JournalError {
    fn from(err: StorageError) -> Self {
        JournalError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        JournalError::Serialization(err.to_string())
    }
}

impl From<JournalError> for String {
    fn from(err: JournalError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for JournalError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            JournalError::Validation("提示词不能为空".to_string()).to_string(),
            "输入无效: 提示词不能为空"
        );
        assert_eq!(JournalError::Cancelled.to_string(), "操作已取消");
    }

    #[test]
    fn test_error_to_string_conversion() {
        let err = JournalError::NotFound("abc".to_string());
        let s: String = err.into();
        assert_eq!(s, "记录不存在: abc");
    }

    #[test]
    fn test_error_serialize() {
        let err = JournalError::NotFound("test".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"记录不存在: test\"");
    }

    #[test]
    fn test_from_storage_error() {
        let err: JournalError = StorageError::Database("locked".to_string()).into();
        assert_eq!(err.to_string(), "存储错误: 数据库错误: locked");
    }
}
