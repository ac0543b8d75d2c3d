//! 工作区校验错误类型

use collab_storage::StorageError;
use collab_telemetry::DenyReason;
use domain::EntityKind;

/// 工作区归属 / 一致性校验错误。
///
/// 存储层错误原样透传（`Storage`），不做重新解释。
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// 集合中不存在该 id
    #[error("{kind} not found")]
    NotFound { kind: EntityKind },

    /// 实体属于其它工作区（跨工作区访问）
    #[error("access denied: {kind} belongs to another workspace")]
    AccessDenied { kind: EntityKind },

    /// 输入实体跨越多个工作区
    #[error("entities belong to conflicting workspaces: {}", .workspaces.join(", "))]
    CrossWorkspaceConflict { workspaces: Vec<String> },

    /// 输入实体均未指定工作区
    #[error("no workspace specified for entities")]
    UnspecifiedWorkspace,

    /// 关联实体的共同工作区不是当前工作区
    #[error("workspace mismatch: entities belong to {actual}, current workspace is {expected}")]
    WorkspaceMismatch { expected: String, actual: String },

    /// 同一 id 命中多条记录（后端数据异常）
    #[error("duplicate {kind} id: {entity_id}")]
    DuplicateId { kind: EntityKind, entity_id: String },

    /// 调用参数非法
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WorkspaceError {
    /// 面向用户的提示文案。
    pub fn user_message(&self) -> String {
        match self {
            WorkspaceError::NotFound { kind } => format!("The requested {kind} could not be found."),
            WorkspaceError::AccessDenied { kind } => {
                format!("Access denied: this {kind} belongs to a different workspace.")
            }
            WorkspaceError::CrossWorkspaceConflict { workspaces } => format!(
                "Cannot link items from conflicting workspaces ({}).",
                workspaces.join(", ")
            ),
            WorkspaceError::UnspecifiedWorkspace => {
                "Cannot link items: no workspace is specified.".to_string()
            }
            WorkspaceError::WorkspaceMismatch { .. } => {
                "These items belong to a different workspace than the one currently selected."
                    .to_string()
            }
            WorkspaceError::DuplicateId { kind, .. } => {
                format!("Several {kind} records share this id, so the action was cancelled.")
            }
            WorkspaceError::InvalidInput(message) => format!("Invalid request: {message}."),
            WorkspaceError::Storage(_) => {
                "Could not verify workspace access. Please try again.".to_string()
            }
        }
    }

    /// 指标分类。
    pub fn reason(&self) -> DenyReason {
        match self {
            WorkspaceError::NotFound { .. } => DenyReason::NotFound,
            WorkspaceError::AccessDenied { .. } => DenyReason::AccessDenied,
            WorkspaceError::CrossWorkspaceConflict { .. } => DenyReason::CrossWorkspaceConflict,
            WorkspaceError::UnspecifiedWorkspace => DenyReason::UnspecifiedWorkspace,
            WorkspaceError::WorkspaceMismatch { .. } => DenyReason::WorkspaceMismatch,
            WorkspaceError::DuplicateId { .. } => DenyReason::DuplicateId,
            WorkspaceError::InvalidInput(_) => DenyReason::InvalidInput,
            WorkspaceError::Storage(_) => DenyReason::Storage,
        }
    }

    /// 记录诊断日志（存储错误为 error，其余为 warn）。
    pub(crate) fn log(&self, operation: &'static str) {
        match self {
            WorkspaceError::Storage(err) => {
                tracing::error!(operation, error = %err, "workspace check failed");
            }
            other => {
                tracing::warn!(operation, error = %other, "workspace check failed");
            }
        }
    }
}
