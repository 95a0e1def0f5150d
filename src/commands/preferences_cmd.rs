//! 用户偏好命令

use journal_prompts_core::{UserPreferences, VoiceType};

use crate::app_state::AppState;

pub fn get_preferences(state: &AppState) -> Result<UserPreferences, String> {
    Ok(state.preferences.get())
}

/// 设置朗读语音（male / female）
pub fn set_voice(state: &AppState, voice: String) -> Result<UserPreferences, String> {
    let voice: VoiceType = voice.parse()?;
    Ok(state.preferences.set_voice(voice)?)
}

pub fn set_language(state: &AppState, language: String) -> Result<UserPreferences, String> {
    Ok(state.preferences.set_language(&language)?)
}
