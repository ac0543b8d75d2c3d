//! 工作区归属校验
//!
//! - load_entity：按 id 读取实体（不存在 / 重复 id 报错）
//! - validate_ownership：读取实体并确认其属于期望工作区

use crate::error::WorkspaceError;
use collab_storage::{EntityStore, FilterQuery};
use domain::{EntityKind, EntityRecord};

/// 按 id 读取实体。
///
/// 只取两条用于判断 id 是否重复。
pub async fn load_entity(
    store: &dyn EntityStore,
    kind: EntityKind,
    entity_id: &str,
) -> Result<EntityRecord, WorkspaceError> {
    let result = find_unique(store, kind, entity_id).await;
    if let Err(err) = &result {
        err.log("load_entity");
    }
    result
}

/// 校验实体归属期望工作区，成功时原样返回实体。
pub async fn validate_ownership(
    store: &dyn EntityStore,
    kind: EntityKind,
    entity_id: &str,
    expected_workspace_id: &str,
) -> Result<EntityRecord, WorkspaceError> {
    let result = check_ownership(store, kind, entity_id, expected_workspace_id).await;
    match &result {
        Ok(_) => tracing::debug!(%kind, entity_id, "ownership verified"),
        Err(err) => err.log("validate_ownership"),
    }
    result
}

async fn check_ownership(
    store: &dyn EntityStore,
    kind: EntityKind,
    entity_id: &str,
    expected_workspace_id: &str,
) -> Result<EntityRecord, WorkspaceError> {
    if expected_workspace_id.trim().is_empty() {
        return Err(WorkspaceError::InvalidInput(
            "workspace id required".to_string(),
        ));
    }
    let entity = find_unique(store, kind, entity_id).await?;
    if entity.workspace() != Some(expected_workspace_id) {
        return Err(WorkspaceError::AccessDenied { kind });
    }
    Ok(entity)
}

async fn find_unique(
    store: &dyn EntityStore,
    kind: EntityKind,
    entity_id: &str,
) -> Result<EntityRecord, WorkspaceError> {
    if entity_id.trim().is_empty() {
        return Err(WorkspaceError::InvalidInput(format!("{kind} id required")));
    }
    let query = FilterQuery::by_id(entity_id).limit(2);
    let mut matches = store.filter(kind, &query).await?;
    if matches.len() > 1 {
        return Err(WorkspaceError::DuplicateId {
            kind,
            entity_id: entity_id.to_string(),
        });
    }
    matches.pop().ok_or(WorkspaceError::NotFound { kind })
}
