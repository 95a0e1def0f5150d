//! 用户偏好（朗读语音、界面语言）

use journal_prompts_core::{UserPreferences, VoiceType};
use journal_prompts_infra::SharedStorage;
use parking_lot::RwLock;

use crate::error::{JournalError, Result};

pub const PREFERENCES_KEY: &str = "user_preferences";

pub struct PreferencesService {
    storage: SharedStorage,
    current: RwLock<UserPreferences>,
}

impl PreferencesService {
    pub fn load(storage: SharedStorage) -> Self {
        let current = match storage.get_item(PREFERENCES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("[Preferences] 解析失败，使用默认偏好: {}", e);
                UserPreferences::default()
            }),
            Ok(None) => UserPreferences::default(),
            Err(e) => {
                tracing::error!("[Preferences] 读取失败，使用默认偏好: {}", e);
                UserPreferences::default()
            }
        };

        Self {
            storage,
            current: RwLock::new(current),
        }
    }

    pub fn get(&self) -> UserPreferences {
        self.current.read().clone()
    }

    pub fn set_voice(&self, voice: VoiceType) -> Result<UserPreferences> {
        self.update(|prefs| prefs.voice = voice)
    }

    pub fn set_language(&self, language: &str) -> Result<UserPreferences> {
        let language = language.trim();
        if language.is_empty() {
            return Err(JournalError::Validation("语言代码不能为空".to_string()));
        }
        let language = language.to_lowercase();
        self.update(|prefs| prefs.language = language)
    }

    fn update(&self, apply: impl FnOnce(&mut UserPreferences)) -> Result<UserPreferences> {
        let mut current = self.current.write();
        apply(&mut current);
        let json = serde_json::to_string(&*current)?;
        self.storage.set_item(PREFERENCES_KEY, &json)?;
        Ok(current.clone())
    }
}
