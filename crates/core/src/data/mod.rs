//! 静态数据
//!
//! - `catalog` - 日记目标 / 类型目录与 emoji
//! - `fallback` - 内置数据集、回退数据集与通用回退提示词
//! - `affirmations` - 肯定语分类文本

pub mod affirmations;
pub mod catalog;
pub mod fallback;

pub use catalog::{category_emoji, JournalOption, JOURNAL_GOALS, JOURNAL_TYPES};
pub use fallback::{
    bundled_dataset_json, fallback_dataset, synthesize_prompt, GENERIC_FALLBACK_PROMPTS,
};
