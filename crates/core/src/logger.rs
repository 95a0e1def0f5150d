//! 日志管理模块
//!
//! 初始化全局 tracing subscriber，可选择写入日志文件。
//! 日志文件超过大小上限时按时间戳轮转，超过保留天数的轮转文件会被清理。
use chrono::{Duration, Local, Utc};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LOG_FILE_NAME: &str = "journal-prompts.log";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// trace / debug / info / warn / error
    pub level: String,
    pub enable_file_logging: bool,
    pub log_dir: PathBuf,
    pub retention_days: u32,
    pub max_file_size: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        // 默认日志目录: ~/.journal-prompts/logs
        let log_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".journal-prompts")
            .join("logs");

        Self {
            level: "info".to_string(),
            enable_file_logging: false,
            log_dir,
            retention_days: 7,
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

impl LoggerConfig {
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

/// 初始化全局日志
///
/// 返回实际使用的日志文件路径（仅文件日志模式）。
/// 重复初始化不会报错，保留第一次安装的 subscriber。
pub fn init_logging(config: &LoggerConfig) -> Result<Option<PathBuf>, String> {
    let level = tracing::Level::from_str(&config.level)
        .map_err(|_| format!("无效的日志级别: {}", config.level))?;

    if !config.enable_file_logging {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        return Ok(None);
    }

    fs::create_dir_all(&config.log_dir)
        .map_err(|e| format!("无法创建日志目录 {:?}: {}", config.log_dir, e))?;

    let path = config.log_file_path();
    rotate_log_file_if_needed(&path, config.max_file_size);
    prune_old_logs(&path, config.retention_days);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("无法打开日志文件 {:?}: {}", path, e))?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(Some(path))
}

/// 文件超过上限时重命名为 `<name>.<时间戳>`，返回是否发生了轮转
pub fn rotate_log_file_if_needed(path: &Path, max_file_size: u64) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    if metadata.len() <= max_file_size {
        return false;
    }

    let suffix = Local::now().format("%Y%m%d-%H%M%S");
    let rotated = path.with_file_name(format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        suffix
    ));

    fs::rename(path, &rotated).is_ok()
}

/// 删除超过保留天数的轮转文件，返回删除的数量
pub fn prune_old_logs(path: &Path, retention_days: u32) -> usize {
    let Some(dir) = path.parent() else {
        return 0;
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    let cutoff = Utc::now() - Duration::days(retention_days as i64);
    let prefix = format!(
        "{}.",
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    let mut removed = 0;
    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if !file_name.starts_with(&prefix) {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let modified = chrono::DateTime::<Utc>::from(modified);
        if modified < cutoff && fs::remove_file(entry.path()).is_ok() {
            removed += 1;
        }
    }
    removed
}
