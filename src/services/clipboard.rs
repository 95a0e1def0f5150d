//! 剪贴板写入
//!
//! 单向写入，失败只记录日志（无图形环境时很常见）。

pub struct ClipboardService;

impl ClipboardService {
    pub fn new() -> Self {
        Self
    }

    /// 写入剪贴板，返回是否成功
    pub fn copy(&self, text: &str) -> bool {
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match result {
            Ok(()) => {
                tracing::debug!("[Clipboard] 已复制 {} 个字符", text.chars().count());
                true
            }
            Err(e) => {
                tracing::warn!("[Clipboard] 复制失败: {}", e);
                false
            }
        }
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}
