//! 内置数据集与回退内容

use indexmap::IndexMap;

use crate::models::{PromptDataset, STANDARD_TYPE};

/// 编译进二进制的完整数据集
const BUNDLED_PROMPTS_JSON: &str = include_str!("../../resources/prompts.json");

/// 数据集里找不到目标 / 类型时使用的通用提示词
pub const GENERIC_FALLBACK_PROMPTS: &[&str] = &[
    "What are you grateful for today, and how can you build upon that gratitude?",
    "Describe one thing that brought you joy today and why it was meaningful.",
    "What is one small step you can take tomorrow to improve your well-being?",
    "Reflect on a recent challenge and identify one lesson you learned from it.",
    "What would you like to focus your energy on this week?",
    "How can you show kindness to yourself today?",
];

const FALLBACK_GOALS: &[(&str, &[&str])] = &[
    (
        "Standard Entry",
        &[
            "What happened today that you want to record?",
            "What are you grateful for today, and how can you build upon that gratitude?",
            "Describe a challenge you faced recently and what you learned from it.",
            "What is one small step you can take today toward a goal that matters to you?",
            "Reflect on a moment today when you felt genuinely happy. What made it special?",
        ],
    ),
    (
        "Self-Reflection",
        &[
            "What patterns in your thoughts or behaviors have you noticed lately?",
            "How have you grown in the past month, and what evidence supports this growth?",
            "What values are most important to you right now, and how are you living them?",
            "What would your future self thank you for doing today?",
            "What story are you telling yourself about your current situation, and is it serving you?",
        ],
    ),
    (
        "Stress Reduction",
        &[
            "What three things can you control in your current situation?",
            "Describe a place or memory that brings you peace. How can you carry that feeling with you?",
            "What would you say to a friend experiencing your current stress?",
            "How can you create more space for calm in your daily routine?",
            "What small act of self-care would make the biggest difference in your day?",
        ],
    ),
];

pub fn bundled_dataset_json() -> &'static str {
    BUNDLED_PROMPTS_JSON
}

/// 数据集加载失败时使用的小型数据集，每个目标只有 Standard 类型
pub fn fallback_dataset() -> PromptDataset {
    let journal_goals = FALLBACK_GOALS
        .iter()
        .map(|(goal, prompts)| {
            let mut types = IndexMap::new();
            types.insert(
                STANDARD_TYPE.to_string(),
                prompts.iter().map(|p| p.to_string()).collect(),
            );
            (goal.to_string(), types)
        })
        .collect();

    PromptDataset { journal_goals }
}

/// 最后的兜底：根据目标和类型拼一句提示词
pub fn synthesize_prompt(goal: &str, journal_type: &str) -> String {
    format!(
        "What aspects of {} would you like to explore through {} journaling?",
        goal.to_lowercase(),
        journal_type.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let dataset = PromptDataset::from_json(bundled_dataset_json()).unwrap();
        assert!(!dataset.is_empty());
        for option in crate::data::JOURNAL_GOALS {
            assert!(
                dataset.bucket(option.value, STANDARD_TYPE).is_some(),
                "missing Standard bucket for {}",
                option.value
            );
        }
    }

    #[test]
    fn test_fallback_dataset_shape() {
        let dataset = fallback_dataset();
        assert_eq!(dataset.goals().len(), 3);
        assert_eq!(dataset.bucket("Self-Reflection", STANDARD_TYPE).unwrap().len(), 5);
    }

    #[test]
    fn test_synthesize_prompt() {
        let prompt = synthesize_prompt("Goal Setting", "Dream Journal");
        assert!(prompt.contains("goal setting"));
        assert!(prompt.contains("dream journal"));
    }
}
