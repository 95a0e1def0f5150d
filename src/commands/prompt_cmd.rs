//! 提示词生成命令
//!
//! 提供生成、目录查询和数据集重载

use indexmap::IndexMap;
use journal_prompts_core::data::{category_emoji, JOURNAL_GOALS, JOURNAL_TYPES};
use journal_prompts_core::BucketSource;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::app_state::AppState;

/// 生成请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptsRequest {
    pub goal: String,
    pub journal_type: String,
    pub count: Option<usize>,
}

/// 单条提示词卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptCard {
    pub text: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompts {
    pub goal: String,
    pub journal_type: String,
    pub emoji: String,
    pub source: BucketSource,
    pub prompts: Vec<PromptCard>,
}

/// 表单中的一项
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOption {
    pub value: String,
    pub emoji: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub goals: Vec<CatalogOption>,
    pub types: Vec<CatalogOption>,
    /// 数据集中实际存在的 目标 -> 类型
    pub available: IndexMap<String, Vec<String>>,
    pub degraded: bool,
}

/// 生成提示词
///
/// 目标或类型为空白时拒绝，其余按原样查找（区分大小写和空白）；
/// 取消令牌在延迟期间被触发时返回取消错误。
pub async fn generate_prompts(
    state: &AppState,
    request: GeneratePromptsRequest,
    cancel: &CancellationToken,
) -> Result<GeneratedPrompts, String> {
    if request.goal.trim().is_empty() || request.journal_type.trim().is_empty() {
        return Err("请先选择日记目标和类型".to_string());
    }

    let selection = state
        .prompts
        .generate(&request.goal, &request.journal_type, request.count, cancel)
        .await?;

    let prompts = selection
        .prompts
        .into_iter()
        .map(|text| PromptCard {
            is_favorite: state.favorites.has(&text),
            text,
        })
        .collect();

    Ok(GeneratedPrompts {
        emoji: category_emoji(&selection.goal).to_string(),
        goal: selection.goal,
        journal_type: selection.journal_type,
        source: selection.source,
        prompts,
    })
}

/// 获取目标 / 类型目录
pub async fn get_catalog(state: &AppState) -> Result<Catalog, String> {
    let to_options = |options: &[journal_prompts_core::data::JournalOption]| {
        options
            .iter()
            .map(|option| CatalogOption {
                value: option.value.to_string(),
                emoji: option.emoji.to_string(),
            })
            .collect::<Vec<_>>()
    };

    let mut available = IndexMap::new();
    for goal in state.prompts.goals().await? {
        let types = state.prompts.types_for(&goal).await?;
        available.insert(goal, types);
    }

    Ok(Catalog {
        goals: to_options(JOURNAL_GOALS),
        types: to_options(JOURNAL_TYPES),
        available,
        degraded: state.prompts.is_degraded().await,
    })
}

/// 重新加载数据集，同时清空使用记录
pub async fn reload_dataset(state: &AppState) -> Result<bool, String> {
    state.prompts.reload().await?;
    Ok(!state.prompts.is_degraded().await)
}
