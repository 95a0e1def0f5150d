//! 业务服务模块
//!
//! 提示词选择与生成、收藏、自定义提示词、用户偏好、剪贴板和肯定语。

pub mod affirmation_generator;
pub mod clipboard;
pub mod custom_prompts;
pub mod dataset_loader;
pub mod favorites_store;
pub mod preferences;
pub mod prompt_selector;
pub mod prompt_service;

#[cfg(test)]
mod tests;

pub use affirmation_generator::{Affirmation, AffirmationGenerator};
pub use clipboard::ClipboardService;
pub use custom_prompts::{CustomPromptsManager, CUSTOM_PROMPTS_KEY};
pub use dataset_loader::{DatasetLoader, DatasetSource, LoadedDataset};
pub use favorites_store::{
    FavoritesStore, RecordFavorites, TextFavorites, FAVORITES_KEY, FAVORITE_RECORDS_KEY,
};
pub use preferences::{PreferencesService, PREFERENCES_KEY};
pub use prompt_selector::{PromptSelector, Selection, SelectorConfig, UsageTracker};
pub use prompt_service::PromptService;
