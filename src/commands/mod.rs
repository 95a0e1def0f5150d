//! 命令层
//!
//! 命令函数接收 `&AppState`，错误统一转换为 `String` 返回给前端（这里是命令行）。

pub mod affirmation_cmd;
pub mod custom_prompt_cmd;
pub mod favorites_cmd;
pub mod preferences_cmd;
pub mod prompt_cmd;
