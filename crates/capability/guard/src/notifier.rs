//! 用户提示通道
//!
//! 守卫失败时通过注入的 `Notifier` 发出一条提示，不依赖全局 UI 状态。

use std::sync::RwLock;

/// 提示通道（即发即弃）。
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// 以 tracing 事件输出提示（无 UI 的宿主使用）。
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::warn!(target: "collab_guard::notify", notification = message, "user notification");
    }
}

/// 记录提示的内存通道。
///
/// 宿主可定期 `drain` 后渲染到自己的界面。
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: RwLock<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的提示（按发出顺序）。
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .read()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .map(|messages| messages.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 取出并清空已记录的提示。
    pub fn drain(&self) -> Vec<String> {
        self.messages
            .write()
            .map(|mut messages| std::mem::take(&mut *messages))
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify_error(&self, message: &str) {
        if let Ok(mut messages) = self.messages.write() {
            messages.push(message.to_string());
        }
    }
}
