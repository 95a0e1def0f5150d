//! 纯数据模型

pub mod custom_prompt_model;
pub mod favorite_model;
pub mod preferences_model;
pub mod prompt_dataset;

pub use custom_prompt_model::CustomPrompt;
pub use favorite_model::{Favorite, FavoriteRecord};
pub use preferences_model::{UserPreferences, VoiceType};
pub use prompt_dataset::{BucketSource, NormalizeStats, PromptDataset, STANDARD_TYPE};
