//! 提示词数据集模型
//!
//! 数据集结构：`{ "journalGoals": { goal: { type: [prompt, ...] } } }`
//!
//! 加载后只读，通过 `Arc<PromptDataset>` 共享。使用 `IndexMap` 保持文件中的键顺序，
//! 这样目标和类型列表的展示顺序是稳定的。

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 每个目标下的默认日记类型，找不到指定类型时回退到这里
pub const STANDARD_TYPE: &str = "Standard";

/// 类型名 -> 提示词列表
pub type TypeBuckets = IndexMap<String, Vec<String>>;

/// 提示词数据集
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptDataset {
    #[serde(rename = "journalGoals", default)]
    pub journal_goals: IndexMap<String, TypeBuckets>,
}

impl PromptDataset {
    /// 宽松解析
    ///
    /// 只有 JSON 本身无效或根节点不是对象时返回错误。格式不对的目标、类型和提示词
    /// 逐个丢弃并记录日志，其余部分照常使用。
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: RawDataset = serde_json::from_str(content)?;

        let goals = match raw.journal_goals {
            Lenient::Valid(goals) => goals,
            Lenient::Invalid(value) => {
                tracing::warn!("[PromptDataset] journalGoals 不是对象，已忽略: {}", value);
                IndexMap::new()
            }
        };

        let mut journal_goals = IndexMap::with_capacity(goals.len());
        for (goal, types) in goals {
            let types = match types {
                Lenient::Valid(types) => types,
                Lenient::Invalid(value) => {
                    tracing::warn!("[PromptDataset] 目标 {} 不是对象，已丢弃: {}", goal, value);
                    continue;
                }
            };

            let mut buckets = TypeBuckets::with_capacity(types.len());
            for (journal_type, prompts) in types {
                let prompts = match prompts {
                    Lenient::Valid(prompts) => prompts,
                    Lenient::Invalid(value) => {
                        tracing::warn!(
                            "[PromptDataset] {} - {} 不是数组，已丢弃: {}",
                            goal,
                            journal_type,
                            value
                        );
                        continue;
                    }
                };

                let total = prompts.len();
                let bucket: Vec<String> = prompts
                    .into_iter()
                    .filter_map(|prompt| match prompt {
                        Lenient::Valid(text) => Some(text),
                        Lenient::Invalid(_) => None,
                    })
                    .collect();
                if bucket.len() < total {
                    tracing::warn!(
                        "[PromptDataset] {} - {} 中有 {} 条非字符串提示词已丢弃",
                        goal,
                        journal_type,
                        total - bucket.len()
                    );
                }
                buckets.insert(journal_type, bucket);
            }
            journal_goals.insert(goal, buckets);
        }

        Ok(Self { journal_goals })
    }

    /// 精确查找 `dataset[goal][type]`，大小写敏感；空列表视为缺失
    pub fn bucket(&self, goal: &str, journal_type: &str) -> Option<&[String]> {
        self.journal_goals
            .get(goal)
            .and_then(|types| types.get(journal_type))
            .filter(|prompts| !prompts.is_empty())
            .map(Vec::as_slice)
    }

    pub fn goals(&self) -> Vec<&str> {
        self.journal_goals.keys().map(String::as_str).collect()
    }

    pub fn types_for(&self, goal: &str) -> Vec<&str> {
        self.journal_goals
            .get(goal)
            .map(|types| types.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn total_prompts(&self) -> usize {
        self.journal_goals
            .values()
            .flat_map(|types| types.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_prompts() == 0
    }

    /// 题库去重（保留第一次出现的顺序），再移除空的类型列表和没有任何类型的目标
    pub fn normalize(&mut self) -> NormalizeStats {
        let mut stats = NormalizeStats::default();
        for types in self.journal_goals.values_mut() {
            for prompts in types.values_mut() {
                let before = prompts.len();
                let mut seen = HashSet::with_capacity(before);
                prompts.retain(|prompt| seen.insert(prompt.clone()));
                stats.duplicate_prompts += before - prompts.len();
            }

            let before = types.len();
            types.retain(|_, prompts| !prompts.is_empty());
            stats.empty_buckets += before - types.len();
        }
        self.journal_goals.retain(|_, types| !types.is_empty());
        stats
    }
}

/// `normalize` 的处理结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub empty_buckets: usize,
    pub duplicate_prompts: usize,
}

/// 解析时先按预期结构尝试，失败则保留原值用于日志
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

impl<T: Default> Default for Lenient<T> {
    fn default() -> Self {
        Self::Valid(T::default())
    }
}

type RawBucket = Vec<Lenient<String>>;
type RawGoals = IndexMap<String, Lenient<IndexMap<String, Lenient<RawBucket>>>>;

#[derive(Deserialize)]
struct RawDataset {
    #[serde(rename = "journalGoals", default)]
    journal_goals: Lenient<RawGoals>,
}

/// 一次选择最终使用的提示词来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketSource {
    /// `dataset[goal][type]`
    Exact,
    /// `dataset[goal]["Standard"]`
    Standard,
    /// 内置的通用回退列表
    Generic,
    /// 根据目标和类型拼出来的句子
    Synthesized,
}

impl BucketSource {
    /// 是否来自数据集本身（只有这类来源参与去重记录）
    pub fn is_curated(&self) -> bool {
        matches!(self, Self::Exact | Self::Standard)
    }
}

impl std::fmt::Display for BucketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Exact => "exact",
            Self::Standard => "standard",
            Self::Generic => "generic",
            Self::Synthesized => "synthesized",
        };
        write!(f, "{}", s)
    }
}
