//! 自定义提示词命令

use journal_prompts_core::CustomPrompt;

use crate::app_state::AppState;

pub fn list_custom_prompts(state: &AppState) -> Result<Vec<CustomPrompt>, String> {
    Ok(state.custom_prompts.list())
}

pub fn create_custom_prompt(state: &AppState, text: String) -> Result<CustomPrompt, String> {
    Ok(state.custom_prompts.create(&text)?)
}

pub fn update_custom_prompt(
    state: &AppState,
    id: String,
    text: String,
) -> Result<CustomPrompt, String> {
    Ok(state.custom_prompts.update(&id, &text)?)
}

/// 删除自定义提示词，同文本的收藏一起移除
pub fn delete_custom_prompt(state: &AppState, id: String) -> Result<CustomPrompt, String> {
    Ok(state.custom_prompts.delete(&id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use journal_prompts_infra::{MemoryStorage, SharedStorage};
    use std::sync::Arc;

    #[test]
    fn test_crud_through_commands() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let state = AppState::with_storage(AppConfig::default(), storage).unwrap();

        let err = create_custom_prompt(&state, "  ".to_string()).unwrap_err();
        assert!(err.starts_with("输入无效"));
        assert!(list_custom_prompts(&state).unwrap().is_empty());

        let prompt = create_custom_prompt(&state, "Describe your morning.".to_string()).unwrap();
        let updated =
            update_custom_prompt(&state, prompt.id.clone(), "Describe your evening.".to_string())
                .unwrap();
        assert_eq!(updated.id, prompt.id);

        let err = delete_custom_prompt(&state, "missing".to_string()).unwrap_err();
        assert!(err.starts_with("记录不存在"));

        delete_custom_prompt(&state, prompt.id).unwrap();
        assert!(list_custom_prompts(&state).unwrap().is_empty());
    }
}
