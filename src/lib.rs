//! 日记提示词与肯定语生成
//!
//! - `services` - 提示词选择、收藏、自定义提示词等业务逻辑
//! - `commands` - 面向前端的命令函数
//! - `database` - 存储初始化与迁移
//! - `app_state` - 启动时组装的共享状态

pub mod app_state;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod services;

pub use app_state::AppState;
pub use config::AppConfig;
pub use error::{JournalError, Result};
