//! 肯定语生成
//!
//! 从固定分类里随机取一句肯定语；提供名字时套用个性化模板。

use journal_prompts_core::data::affirmations::{
    affirmation_emoji, affirmations_for, DEFAULT_AFFIRMATION_CATEGORY,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affirmation {
    /// 实际使用的分类（未知分类会落到默认分类）
    pub category: String,
    pub emoji: String,
    pub text: String,
}

pub struct AffirmationGenerator;

impl AffirmationGenerator {
    pub fn generate<R: Rng + ?Sized>(category: &str, name: Option<&str>, rng: &mut R) -> Affirmation {
        let (category, texts) = match affirmations_for(category) {
            Some(texts) => (category, texts),
            None => {
                tracing::debug!(
                    "[Affirmation] 未知分类 {}，使用 {}",
                    category,
                    DEFAULT_AFFIRMATION_CATEGORY
                );
                (
                    DEFAULT_AFFIRMATION_CATEGORY,
                    affirmations_for(DEFAULT_AFFIRMATION_CATEGORY).unwrap_or(&[]),
                )
            }
        };

        let base = texts.choose(rng).copied().unwrap_or_default();
        let text = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => personalize(base, name, rng.gen_range(0..3)),
            None => base.to_string(),
        };

        Affirmation {
            category: category.to_string(),
            emoji: affirmation_emoji(category).to_string(),
            text,
        }
    }
}

fn personalize(base: &str, name: &str, pattern: usize) -> String {
    match pattern {
        0 => format!("{}, {}", name, base.to_lowercase()),
        1 => format!("{} This is your truth, {}.", base, name),
        _ => format!("Remember, {}: {}", name, base.to_lowercase()),
    }
}
