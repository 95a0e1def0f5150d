use journal_prompts_core::FavoriteRecord;
use journal_prompts_infra::SharedStorage;
use serde_json::Value;

use crate::services::favorites_store::{FAVORITES_KEY, FAVORITE_RECORDS_KEY};

const FAVORITE_RECORDS_MIGRATED_KEY: &str = "migrated_favorite_records";

/// 把混在 `affirmation_favorites` 里的结构化收藏搬到 `affirmation_favorite_records`
///
/// 早期版本的肯定语收藏（带 id/分类/时间戳的对象）和提示词收藏（纯文本）共用同一个键。
/// 迁移逻辑：
/// 1. 读取 `affirmation_favorites` 数组
/// 2. 对象元素转换为 `FavoriteRecord`，追加到记录键（按 id 去重）
/// 3. 字符串元素留在原键
/// 4. 写入迁移标记，之后启动直接跳过
pub fn migrate_favorite_records(storage: &SharedStorage) -> Result<usize, String> {
    let migrated = storage
        .get_item(FAVORITE_RECORDS_MIGRATED_KEY)
        .map_err(|e| format!("读取迁移标记失败: {}", e))?
        .map(|v| v == "true")
        .unwrap_or(false);

    if migrated {
        tracing::debug!("[迁移] 收藏记录已迁移过，跳过");
        return Ok(0);
    }

    let legacy = storage
        .get_item(FAVORITES_KEY)
        .map_err(|e| format!("读取旧收藏失败: {}", e))?;

    let mut migrated_count = 0;
    if let Some(raw) = legacy {
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(values)) => {
                migrated_count = split_legacy_favorites(storage, values)?;
            }
            Ok(_) | Err(_) => {
                // 损坏的数据留给收藏存储按空集合处理
                tracing::warn!("[迁移] 旧收藏不是 JSON 数组，跳过迁移");
            }
        }
    }

    storage
        .set_item(FAVORITE_RECORDS_MIGRATED_KEY, "true")
        .map_err(|e| format!("写入迁移标记失败: {}", e))?;

    if migrated_count > 0 {
        tracing::info!("[迁移] 迁移了 {} 条结构化收藏", migrated_count);
    }
    Ok(migrated_count)
}

fn split_legacy_favorites(storage: &SharedStorage, values: Vec<Value>) -> Result<usize, String> {
    let mut texts = Vec::new();
    let mut moved = Vec::new();
    for value in values {
        match value {
            Value::String(text) => texts.push(Value::String(text)),
            Value::Object(_) => match serde_json::from_value::<FavoriteRecord>(value) {
                Ok(record) => moved.push(record),
                Err(e) => tracing::warn!("[迁移] 跳过无法识别的收藏: {}", e),
            },
            other => tracing::warn!("[迁移] 跳过无法识别的收藏: {}", other),
        }
    }

    if moved.is_empty() {
        return Ok(0);
    }

    let mut records: Vec<FavoriteRecord> = storage
        .get_item(FAVORITE_RECORDS_KEY)
        .map_err(|e| format!("读取收藏记录失败: {}", e))?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default();

    let mut count = 0;
    for record in moved {
        if records.iter().any(|r| r.id == record.id) {
            tracing::debug!("[迁移] 跳过已存在的收藏记录: {}", record.id);
            continue;
        }
        records.push(record);
        count += 1;
    }

    let records_json =
        serde_json::to_string(&records).map_err(|e| format!("序列化收藏记录失败: {}", e))?;
    storage
        .set_item(FAVORITE_RECORDS_KEY, &records_json)
        .map_err(|e| format!("写入收藏记录失败: {}", e))?;

    let texts_json =
        serde_json::to_string(&texts).map_err(|e| format!("序列化收藏失败: {}", e))?;
    storage
        .set_item(FAVORITES_KEY, &texts_json)
        .map_err(|e| format!("写入收藏失败: {}", e))?;

    Ok(count)
}
