//! 服务层属性测试
//!
//! 用 proptest 随机生成数据集、目标和调用序列，检查选择器和收藏存储的不变量。
//!
//! ## 测试覆盖
//! - 抽取结果互不相同且来自题库
//! - 未知目标/类型总能得到非空提示词
//! - 题库含重复文本时结果仍互不相同
//! - 使用记录不超过题库长度
//! - 收藏添加幂等、重新加载后内容一致

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use indexmap::IndexMap;
    use journal_prompts_core::{BucketSource, PromptDataset};
    use journal_prompts_infra::{MemoryStorage, SharedStorage};
    use proptest::prelude::*;

    use super::super::favorites_store::{TextFavorites, FAVORITES_KEY};
    use super::super::prompt_selector::{PromptSelector, SelectorConfig};

    fn dataset_with(goal: &str, journal_type: &str, bucket: Vec<String>) -> Arc<PromptDataset> {
        let mut types = IndexMap::new();
        types.insert(journal_type.to_string(), bucket);
        let mut journal_goals = IndexMap::new();
        journal_goals.insert(goal.to_string(), types);
        Arc::new(PromptDataset { journal_goals })
    }

    /// 互不相同的题库
    fn bucket_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[a-z]{1,8}", 1..20)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
    }

    // ========================================================================
    // 选择器
    // ========================================================================

    proptest! {
        #[test]
        fn prop_select_distinct_members(
            bucket in bucket_strategy(),
            seed in any::<u64>(),
            count_seed in any::<usize>(),
        ) {
            let count = 1 + count_seed % bucket.len();
            let selector = PromptSelector::with_seed(
                dataset_with("Goal", "Type", bucket.clone()),
                SelectorConfig::default(),
                seed,
            );

            let prompts = selector.select_prompts("Goal", "Type", count);
            prop_assert_eq!(prompts.len(), count);

            let unique: HashSet<&String> = prompts.iter().collect();
            prop_assert_eq!(unique.len(), count);
            prop_assert!(prompts.iter().all(|p| bucket.contains(p)));
        }

        #[test]
        fn prop_duplicate_entries_never_repeat(
            bucket in prop::collection::vec("[a-c]", 1..12),
            seed in any::<u64>(),
            count_seed in any::<usize>(),
            rounds in 1usize..6,
        ) {
            let distinct: HashSet<&String> = bucket.iter().collect();
            let count = 1 + count_seed % distinct.len();
            let selector = PromptSelector::with_seed(
                dataset_with("Goal", "Type", bucket.clone()),
                SelectorConfig::default(),
                seed,
            );

            for _ in 0..rounds {
                let prompts = selector.select_prompts("Goal", "Type", count);
                let unique: HashSet<&String> = prompts.iter().collect();
                prop_assert_eq!(unique.len(), count);
                prop_assert!(selector.used_prompts("Goal", "Type").len() <= distinct.len());

                let stateless = selector.select_prompts_stateless("Goal", "Type", count);
                let unique: HashSet<&String> = stateless.iter().collect();
                prop_assert_eq!(unique.len(), count);
            }
        }

        #[test]
        fn prop_unknown_pair_never_empty(
            goal in "[A-Za-z ]{0,16}",
            journal_type in "[A-Za-z ]{0,16}",
            count in 0usize..8,
            seed in any::<u64>(),
        ) {
            let selector = PromptSelector::with_seed(
                dataset_with("Known", "Standard", vec!["x".to_string()]),
                SelectorConfig::default(),
                seed,
            );
            prop_assume!(goal != "Known");

            let prompts = selector.select_prompts(&goal, &journal_type, count);
            prop_assert!(!prompts.is_empty());
            prop_assert!(prompts.iter().all(|p| !p.trim().is_empty()));
        }

        #[test]
        fn prop_synthesized_when_fallback_list_empty(
            goal in "[A-Za-z]{1,12}",
            journal_type in "[A-Za-z]{1,12}",
        ) {
            let config = SelectorConfig {
                fallback_prompts: Vec::new(),
                ..Default::default()
            };
            let selector = PromptSelector::with_seed(
                dataset_with("Known", "Standard", vec!["x".to_string()]),
                config,
                7,
            );
            prop_assume!(goal != "Known");

            let selection = selector.select(&goal, &journal_type, 2);
            prop_assert_eq!(selection.source, BucketSource::Synthesized);
            prop_assert_eq!(selection.prompts.len(), 1);
            prop_assert!(selection.prompts[0].contains(&goal.to_lowercase()));
        }

        #[test]
        fn prop_tracker_bounded_by_bucket(
            bucket in bucket_strategy(),
            counts in prop::collection::vec(1usize..6, 1..30),
            seed in any::<u64>(),
        ) {
            let selector = PromptSelector::with_seed(
                dataset_with("Goal", "Type", bucket.clone()),
                SelectorConfig::default(),
                seed,
            );

            for count in counts {
                selector.select_prompts("Goal", "Type", count);
                let used = selector.used_prompts("Goal", "Type");
                prop_assert!(used.len() <= bucket.len());

                let unique: HashSet<&String> = used.iter().collect();
                prop_assert_eq!(unique.len(), used.len());
                prop_assert!(used.iter().all(|p| bucket.contains(p)));
            }
        }

        #[test]
        fn prop_consecutive_calls_avoid_overlap(
            bucket in prop::collection::hash_set("[a-z]{1,8}", 6..20)
                .prop_map(|set| set.into_iter().collect::<Vec<String>>()),
            seed in any::<u64>(),
        ) {
            let selector = PromptSelector::with_seed(
                dataset_with("Goal", "Type", bucket),
                SelectorConfig::default(),
                seed,
            );

            let first = selector.select_prompts("Goal", "Type", 2);
            let second = selector.select_prompts("Goal", "Type", 2);
            prop_assert!(second.iter().all(|p| !first.contains(p)));
        }
    }

    // ========================================================================
    // 收藏
    // ========================================================================

    proptest! {
        #[test]
        fn prop_favorites_add_idempotent_and_round_trip(
            texts in prop::collection::vec("[a-zA-Z ]{1,12}", 0..12),
        ) {
            let storage: SharedStorage = Arc::new(MemoryStorage::new());
            let store = TextFavorites::load(storage.clone(), FAVORITES_KEY);

            for text in &texts {
                store.add(text.clone()).unwrap();
                let len = store.len();
                prop_assert!(!store.add(text.clone()).unwrap());
                prop_assert_eq!(store.len(), len);
            }

            let expected: HashSet<String> = texts.iter().cloned().collect();
            prop_assert_eq!(store.len(), expected.len());

            let reloaded = TextFavorites::load(storage, FAVORITES_KEY);
            let actual: HashSet<String> = reloaded.list().into_iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
