//! 收藏命令
//!
//! 提示词收藏以文本为标识；肯定语收藏是带 id 的记录。

use journal_prompts_core::FavoriteRecord;

use crate::app_state::AppState;

/// 获取所有提示词收藏
pub fn list_favorites(state: &AppState) -> Result<Vec<String>, String> {
    Ok(state.favorites.list())
}

/// 添加收藏，已存在时返回 false
///
/// 文本原样保存，与生成结果按完全相同的字符串匹配。
pub fn add_favorite(state: &AppState, text: String) -> Result<bool, String> {
    if text.trim().is_empty() {
        return Err("收藏内容不能为空".to_string());
    }
    Ok(state.favorites.add(text)?)
}

/// 移除收藏，不存在时返回 false
pub fn remove_favorite(state: &AppState, text: String) -> Result<bool, String> {
    Ok(state.favorites.remove(&text)?)
}

/// 切换收藏状态，返回切换后是否已收藏
pub fn toggle_favorite(state: &AppState, text: String) -> Result<bool, String> {
    if text.trim().is_empty() {
        return Err("收藏内容不能为空".to_string());
    }
    Ok(state.favorites.toggle(text)?)
}

/// 清空提示词收藏
pub fn clear_favorites(state: &AppState) -> Result<(), String> {
    state.favorites.clear()?;
    Ok(())
}

/// 复制第 `index` 条收藏（从 0 开始）到剪贴板
pub fn copy_favorite(state: &AppState, index: usize) -> Result<bool, String> {
    let favorites = state.favorites.list();
    let text = favorites
        .get(index)
        .ok_or_else(|| format!("收藏不存在: #{}", index + 1))?;
    Ok(state.clipboard.copy(text))
}

/// 获取所有肯定语收藏
pub fn list_affirmation_favorites(state: &AppState) -> Result<Vec<FavoriteRecord>, String> {
    Ok(state.affirmation_favorites.list())
}

/// 按 id 移除肯定语收藏
pub fn remove_affirmation_favorite(state: &AppState, id: String) -> Result<bool, String> {
    Ok(state.affirmation_favorites.remove(&id)?)
}

/// 清空肯定语收藏
pub fn clear_affirmation_favorites(state: &AppState) -> Result<(), String> {
    state.affirmation_favorites.clear()?;
    Ok(())
}
