//! 肯定语命令

use journal_prompts_core::data::affirmations::affirmation_categories;
use journal_prompts_core::FavoriteRecord;
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::services::{Affirmation, AffirmationGenerator};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffirmationResult {
    #[serde(flatten)]
    pub affirmation: Affirmation,
    /// 已保存到肯定语收藏时的记录 id
    pub favorite_id: Option<String>,
}

/// 生成一句肯定语，`save` 为真时同时加入肯定语收藏
pub fn generate_affirmation(
    state: &AppState,
    category: String,
    name: Option<String>,
    save: bool,
) -> Result<AffirmationResult, String> {
    let affirmation = {
        let mut rng = rand::thread_rng();
        AffirmationGenerator::generate(&category, name.as_deref(), &mut rng)
    };

    let favorite_id = if save {
        Some(save_affirmation(state, &affirmation)?)
    } else {
        None
    };

    Ok(AffirmationResult {
        affirmation,
        favorite_id,
    })
}

/// 相同文本只保存一次，返回记录 id
fn save_affirmation(state: &AppState, affirmation: &Affirmation) -> Result<String, String> {
    let language = state.preferences.get().language;
    let (record, added) = state.affirmation_favorites.find_or_add(
        |record| record.text == affirmation.text,
        || {
            FavoriteRecord::new(
                Uuid::new_v4().to_string(),
                affirmation.text.clone(),
                affirmation.category.clone(),
                language,
            )
        },
    )?;
    if added {
        tracing::info!("[Affirmation] 已收藏: {}", record.id);
    }
    Ok(record.id)
}

/// 可选的肯定语分类
pub fn list_affirmation_categories() -> Vec<String> {
    affirmation_categories().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use journal_prompts_infra::{MemoryStorage, SharedStorage};
    use std::sync::Arc;

    fn state() -> AppState {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        AppState::with_storage(AppConfig::default(), storage).unwrap()
    }

    #[test]
    fn test_generate_without_saving() {
        let state = state();
        let result =
            generate_affirmation(&state, "career".to_string(), None, false).unwrap();
        assert_eq!(result.affirmation.category, "career");
        assert!(result.favorite_id.is_none());
        assert!(state.affirmation_favorites.is_empty());
    }

    #[test]
    fn test_save_uses_preferred_language() {
        let state = state();
        state.preferences.set_language("de").unwrap();
        let result =
            generate_affirmation(&state, "health".to_string(), Some("Kim".to_string()), true)
                .unwrap();
        let id = result.favorite_id.unwrap();

        let record = state.affirmation_favorites.get(&id).unwrap();
        assert_eq!(record.language, "de");
        assert_eq!(record.category, "health");
        assert!(record.text.contains("Kim"));
    }

    #[test]
    fn test_save_same_text_once() {
        let state = state();
        let affirmation = Affirmation {
            category: "self-love".to_string(),
            emoji: "💖".to_string(),
            text: "I am enough.".to_string(),
        };
        let first = save_affirmation(&state, &affirmation).unwrap();
        let second = save_affirmation(&state, &affirmation).unwrap();
        assert_eq!(first, second);
        assert_eq!(state.affirmation_favorites.len(), 1);
    }

    #[test]
    fn test_concurrent_saves_keep_one_record() {
        let state = state();
        let affirmation = Affirmation {
            category: "career".to_string(),
            emoji: "💼".to_string(),
            text: "My work matters.".to_string(),
        };

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                let affirmation = affirmation.clone();
                std::thread::spawn(move || save_affirmation(&state, &affirmation).unwrap())
            })
            .collect();
        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(ids.iter().all(|id| id == &ids[0]));
        assert_eq!(state.affirmation_favorites.len(), 1);
    }

    #[test]
    fn test_categories() {
        assert_eq!(list_affirmation_categories().len(), 10);
    }
}
