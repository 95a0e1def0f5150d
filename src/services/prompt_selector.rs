//! 提示词选择器
//!
//! 根据日记目标和类型从数据集中抽取提示词。
//!
//! ## 查找顺序
//! 1. `dataset[goal][type]`
//! 2. `dataset[goal]["Standard"]`
//! 3. 配置中的通用回退列表
//! 4. 回退列表为空时，根据目标和类型拼出一句提示词
//!
//! ## 去重策略
//! - 单次调用内无放回抽样；题库不足时从头循环补齐
//! - 题库中重复的文本只算一条
//! - 跨调用：按实际使用的题库记录最近用过的提示词（回退到 Standard 的类型共用
//!   `(goal, "Standard")` 这条记录），新一轮优先从未使用的里面抽；
//!   剩余数量不足时清空该键的记录
//! - 记录数达到题库的 `compact_ratio` 时只保留最近的 `retain_ratio`，
//!   既避免紧挨着重复，又允许之后重新出现
//!
//! 记录只存在于当前进程，重启后重新开始。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use journal_prompts_core::data::{synthesize_prompt, GENERIC_FALLBACK_PROMPTS};
use journal_prompts_core::{BucketSource, PromptDataset, STANDARD_TYPE};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub compact_ratio: f64,
    pub retain_ratio: f64,
    pub fallback_prompts: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            compact_ratio: 0.7,
            retain_ratio: 0.5,
            fallback_prompts: GENERIC_FALLBACK_PROMPTS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl From<&GenerationConfig> for SelectorConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            compact_ratio: config.compact_ratio,
            retain_ratio: config.retain_ratio,
            fallback_prompts: config.fallback_prompts.clone(),
        }
    }
}

/// 一次选择的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub goal: String,
    pub journal_type: String,
    pub prompts: Vec<String>,
    pub source: BucketSource,
}

/// (goal, type) -> 最近用过的提示词，按使用先后排列
///
/// 记录中的条目互不相同且都来自对应题库，因此长度不会超过题库长度。
#[derive(Debug, Default)]
pub struct UsageTracker {
    used: HashMap<(String, String), Vec<String>>,
}

impl UsageTracker {
    pub fn used(&self, goal: &str, journal_type: &str) -> &[String] {
        self.used
            .get(&(goal.to_string(), journal_type.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }

    fn entry(&mut self, goal: &str, journal_type: &str) -> &mut Vec<String> {
        self.used
            .entry((goal.to_string(), journal_type.to_string()))
            .or_default()
    }
}

/// 追加本轮选中的提示词，并在超过阈值时压缩
fn record_usage(used: &mut Vec<String>, chosen: &[String], bucket_len: usize, config: &SelectorConfig) {
    for prompt in chosen {
        if !used.contains(prompt) {
            used.push(prompt.clone());
        }
    }

    if used.len() as f64 >= bucket_len as f64 * config.compact_ratio {
        let retain = (bucket_len as f64 * config.retain_ratio).floor() as usize;
        let drop = used.len().saturating_sub(retain);
        used.drain(..drop);
        tracing::debug!(
            "[PromptSelector] 压缩使用记录: 丢弃 {} 条，保留 {} 条",
            drop,
            used.len()
        );
    }
}

/// 按第一次出现的顺序去重
fn distinct(bucket: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(bucket.len());
    bucket
        .iter()
        .filter(|prompt| seen.insert(prompt.as_str()))
        .cloned()
        .collect()
}

/// 无放回抽取 `count` 条；去重后不足时按原顺序循环补齐
pub fn sample_unique<R: Rng + ?Sized>(pool: &[String], count: usize, rng: &mut R) -> Vec<String> {
    if pool.is_empty() || count == 0 {
        return Vec::new();
    }
    let pool = distinct(pool);

    let mut chosen: Vec<String> = pool
        .choose_multiple(rng, count.min(pool.len()))
        .cloned()
        .collect();

    if chosen.len() < count {
        let missing = count - chosen.len();
        chosen.extend(pool.iter().cycle().take(missing).cloned());
    }
    chosen
}

/// 提示词选择器
///
/// 数据集只读共享；使用记录和随机数生成器归实例所有，不同实例之间互不影响。
pub struct PromptSelector {
    dataset: Arc<PromptDataset>,
    config: SelectorConfig,
    tracker: Mutex<UsageTracker>,
    rng: Mutex<StdRng>,
}

impl PromptSelector {
    pub fn new(dataset: Arc<PromptDataset>, config: SelectorConfig) -> Self {
        Self::with_rng(dataset, config, StdRng::from_entropy())
    }

    /// 固定种子，便于复现
    pub fn with_seed(dataset: Arc<PromptDataset>, config: SelectorConfig, seed: u64) -> Self {
        Self::with_rng(dataset, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dataset: Arc<PromptDataset>, config: SelectorConfig, rng: StdRng) -> Self {
        Self {
            dataset,
            config,
            tracker: Mutex::new(UsageTracker::default()),
            rng: Mutex::new(rng),
        }
    }

    pub fn dataset(&self) -> &Arc<PromptDataset> {
        &self.dataset
    }

    /// 按查找顺序确定题库；返回 `None` 表示只能拼句兜底
    pub fn resolve(&self, goal: &str, journal_type: &str) -> Option<(&[String], BucketSource)> {
        if let Some(bucket) = self.dataset.bucket(goal, journal_type) {
            return Some((bucket, BucketSource::Exact));
        }

        if let Some(bucket) = self.dataset.bucket(goal, STANDARD_TYPE) {
            tracing::info!(
                "[PromptSelector] 未找到 {} - {}，使用 Standard 题库",
                goal,
                journal_type
            );
            return Some((bucket, BucketSource::Standard));
        }

        if !self.config.fallback_prompts.is_empty() {
            tracing::warn!(
                "[PromptSelector] 未找到 {} - {} 的提示词，使用通用回退列表",
                goal,
                journal_type
            );
            return Some((self.config.fallback_prompts.as_slice(), BucketSource::Generic));
        }

        tracing::warn!(
            "[PromptSelector] 未找到 {} - {} 的提示词且没有回退列表，拼句兜底",
            goal,
            journal_type
        );
        None
    }

    /// 选择提示词，避开同一题库最近用过的条目
    pub fn select(&self, goal: &str, journal_type: &str, count: usize) -> Selection {
        let count = count.max(1);

        let (prompts, source) = match self.resolve(goal, journal_type) {
            Some((bucket, source)) if source.is_curated() => {
                let bucket = distinct(bucket);
                let tracked_type = match source {
                    BucketSource::Standard => STANDARD_TYPE,
                    _ => journal_type,
                };

                let mut tracker = self.tracker.lock();
                let used = tracker.entry(goal, tracked_type);

                let mut available: Vec<String> = bucket
                    .iter()
                    .filter(|p| !used.contains(p))
                    .cloned()
                    .collect();

                if available.len() < count {
                    tracing::debug!(
                        "[PromptSelector] {} - {} 剩余 {} 条不足 {} 条，重置使用记录",
                        goal,
                        journal_type,
                        available.len(),
                        count
                    );
                    used.clear();
                    available = bucket.clone();
                }

                let mut rng = self.rng.lock();
                let mut chosen: Vec<String> = available
                    .choose_multiple(&mut *rng, count.min(available.len()))
                    .cloned()
                    .collect();
                if chosen.len() < count {
                    let missing = count - chosen.len();
                    chosen.extend(bucket.iter().cycle().take(missing).cloned());
                }

                record_usage(used, &chosen, bucket.len(), &self.config);
                (chosen, source)
            }
            Some((bucket, source)) => {
                let mut rng = self.rng.lock();
                (sample_unique(bucket, count, &mut *rng), source)
            }
            None => (
                vec![synthesize_prompt(goal, journal_type)],
                BucketSource::Synthesized,
            ),
        };

        tracing::debug!(
            "[PromptSelector] {} - {}: 来源 {}，返回 {} 条",
            goal,
            journal_type,
            source,
            prompts.len()
        );

        Selection {
            goal: goal.to_string(),
            journal_type: journal_type.to_string(),
            prompts,
            source,
        }
    }

    pub fn select_prompts(&self, goal: &str, journal_type: &str, count: usize) -> Vec<String> {
        self.select(goal, journal_type, count).prompts
    }

    /// 不读写使用记录的版本
    pub fn select_prompts_stateless(
        &self,
        goal: &str,
        journal_type: &str,
        count: usize,
    ) -> Vec<String> {
        let count = count.max(1);
        match self.resolve(goal, journal_type) {
            Some((bucket, _)) => {
                let mut rng = self.rng.lock();
                sample_unique(bucket, count, &mut *rng)
            }
            None => vec![synthesize_prompt(goal, journal_type)],
        }
    }

    /// 当前记录的已使用提示词；回退到 Standard 的类型返回 Standard 的记录
    pub fn used_prompts(&self, goal: &str, journal_type: &str) -> Vec<String> {
        let tracked_type = if self.dataset.bucket(goal, journal_type).is_none()
            && self.dataset.bucket(goal, STANDARD_TYPE).is_some()
        {
            STANDARD_TYPE
        } else {
            journal_type
        };
        self.tracker.lock().used(goal, tracked_type).to_vec()
    }

    pub fn reset_usage(&self) {
        self.tracker.lock().clear();
    }
}
