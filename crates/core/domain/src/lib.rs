pub mod entity;

pub use entity::{EntityKind, EntityRecord, EntityRef, ParseEntityKindError};

/// 工作区上下文：守卫调用共享的执行上下文。
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    pub workspace_id: String,
    pub user_id: String,
}

impl WorkspaceContext {
    /// 构造显式身份与当前工作区的上下文。
    pub fn new(workspace_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            user_id: user_id.into(),
        }
    }

    /// 是否已选定工作区。
    pub fn has_workspace(&self) -> bool {
        !self.workspace_id.trim().is_empty()
    }
}

impl Default for WorkspaceContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            workspace_id: "".to_string(),
            user_id: "".to_string(),
        }
    }
}
