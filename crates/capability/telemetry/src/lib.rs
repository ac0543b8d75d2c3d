//! 追踪、校验 ID 生成与守卫指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 守卫拒绝原因（指标分类）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotFound,
    AccessDenied,
    CrossWorkspaceConflict,
    UnspecifiedWorkspace,
    WorkspaceMismatch,
    DuplicateId,
    InvalidInput,
    Storage,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub guard_allowed: u64,
    pub guard_denied: u64,
    pub denied_not_found: u64,
    pub denied_access: u64,
    pub denied_conflict: u64,
    pub denied_unspecified: u64,
    pub denied_mismatch: u64,
    pub denied_duplicate: u64,
    pub denied_invalid: u64,
    pub storage_failures: u64,
}

/// 守卫指标。
pub struct TelemetryMetrics {
    guard_allowed: AtomicU64,
    guard_denied: AtomicU64,
    denied_not_found: AtomicU64,
    denied_access: AtomicU64,
    denied_conflict: AtomicU64,
    denied_unspecified: AtomicU64,
    denied_mismatch: AtomicU64,
    denied_duplicate: AtomicU64,
    denied_invalid: AtomicU64,
    storage_failures: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            guard_allowed: AtomicU64::new(0),
            guard_denied: AtomicU64::new(0),
            denied_not_found: AtomicU64::new(0),
            denied_access: AtomicU64::new(0),
            denied_conflict: AtomicU64::new(0),
            denied_unspecified: AtomicU64::new(0),
            denied_mismatch: AtomicU64::new(0),
            denied_duplicate: AtomicU64::new(0),
            denied_invalid: AtomicU64::new(0),
            storage_failures: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            guard_allowed: self.guard_allowed.load(Ordering::Relaxed),
            guard_denied: self.guard_denied.load(Ordering::Relaxed),
            denied_not_found: self.denied_not_found.load(Ordering::Relaxed),
            denied_access: self.denied_access.load(Ordering::Relaxed),
            denied_conflict: self.denied_conflict.load(Ordering::Relaxed),
            denied_unspecified: self.denied_unspecified.load(Ordering::Relaxed),
            denied_mismatch: self.denied_mismatch.load(Ordering::Relaxed),
            denied_duplicate: self.denied_duplicate.load(Ordering::Relaxed),
            denied_invalid: self.denied_invalid.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }

    fn reason_counter(&self, reason: DenyReason) -> &AtomicU64 {
        match reason {
            DenyReason::NotFound => &self.denied_not_found,
            DenyReason::AccessDenied => &self.denied_access,
            DenyReason::CrossWorkspaceConflict => &self.denied_conflict,
            DenyReason::UnspecifiedWorkspace => &self.denied_unspecified,
            DenyReason::WorkspaceMismatch => &self.denied_mismatch,
            DenyReason::DuplicateId => &self.denied_duplicate,
            DenyReason::InvalidInput => &self.denied_invalid,
            DenyReason::Storage => &self.storage_failures,
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 check_id（标记一次守卫调用）。
pub fn new_check_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录守卫放行次数。
pub fn record_guard_allowed() {
    metrics().guard_allowed.fetch_add(1, Ordering::Relaxed);
}

/// 记录守卫拒绝次数（按原因分类）。
pub fn record_guard_denied(reason: DenyReason) {
    let metrics = metrics();
    metrics.guard_denied.fetch_add(1, Ordering::Relaxed);
    metrics
        .reason_counter(reason)
        .fetch_add(1, Ordering::Relaxed);
}
