//! 同工作区一致性校验
//!
//! 纯函数，无 I/O。

use crate::error::WorkspaceError;
use domain::EntityRecord;
use std::collections::BTreeSet;

/// 确认实体共享唯一的工作区并返回该工作区 ID。
///
/// 未指定工作区的实体被忽略；全部未指定（含空输入）时报错。
pub fn validate_same_workspace(entities: &[EntityRecord]) -> Result<String, WorkspaceError> {
    let result = shared_workspace(entities);
    if let Err(err) = &result {
        err.log("validate_same_workspace");
    }
    result
}

fn shared_workspace(entities: &[EntityRecord]) -> Result<String, WorkspaceError> {
    let workspaces: BTreeSet<&str> = entities
        .iter()
        .filter_map(|entity| entity.workspace())
        .collect();
    let mut iter = workspaces.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Err(WorkspaceError::UnspecifiedWorkspace),
        (Some(workspace), None) => Ok(workspace.to_string()),
        (Some(_), Some(_)) => Err(WorkspaceError::CrossWorkspaceConflict {
            workspaces: workspaces.iter().map(|id| id.to_string()).collect(),
        }),
    }
}
