//! 工作区访问守卫：归属校验、同工作区一致性校验与失败提示。
//!
//! - `validate_ownership` / `validate_same_workspace`：返回 `Result`，失败即报错
//! - `WorkspaceGuard`：唯一把错误降级为 `bool` + 一条用户提示的地方
//!
//! ```rust,ignore
//! let guard = WorkspaceGuard::new(store, Arc::new(TracingNotifier));
//! if !guard.guard_single_access(EntityKind::Document, "doc-1", "w1").await {
//!     return;
//! }
//! ```

mod checker;
mod error;
mod notifier;
mod validator;

use collab_storage::EntityStore;
use collab_telemetry::{new_check_id, record_guard_allowed, record_guard_denied};
use domain::{EntityKind, EntityRecord, EntityRef, WorkspaceContext};
use std::sync::Arc;
use tracing::Instrument;

pub use checker::validate_same_workspace;
pub use error::WorkspaceError;
pub use notifier::{MemoryNotifier, Notifier, TracingNotifier};
pub use validator::{load_entity, validate_ownership};

/// 工作区访问守卫（基于 EntityStore + Notifier）。
///
/// 不保存调用间状态，可在多个并发调用间共享。
#[derive(Clone)]
pub struct WorkspaceGuard {
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn Notifier>,
}

impl WorkspaceGuard {
    /// 创建守卫实例。
    pub fn new(store: Arc<dyn EntityStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// 校验单个实体属于当前工作区。
    pub async fn check_single_access(
        &self,
        kind: EntityKind,
        entity_id: &str,
        current_workspace_id: &str,
    ) -> Result<EntityRecord, WorkspaceError> {
        validate_ownership(self.store.as_ref(), kind, entity_id, current_workspace_id).await
    }

    /// 校验待关联实体共享当前工作区。
    pub fn check_multi_entity_link(
        &self,
        entities: &[EntityRecord],
        current_workspace_id: &str,
    ) -> Result<String, WorkspaceError> {
        let shared = validate_same_workspace(entities)?;
        if shared != current_workspace_id {
            let err = WorkspaceError::WorkspaceMismatch {
                expected: current_workspace_id.to_string(),
                actual: shared,
            };
            err.log("check_multi_entity_link");
            return Err(err);
        }
        Ok(shared)
    }

    /// 按引用读取实体（逐个顺序读取）。
    pub async fn load_refs(&self, refs: &[EntityRef]) -> Result<Vec<EntityRecord>, WorkspaceError> {
        let mut entities = Vec::with_capacity(refs.len());
        for entity in refs {
            entities.push(load_entity(self.store.as_ref(), entity.kind, &entity.id).await?);
        }
        Ok(entities)
    }

    /// 按引用读取实体后校验它们共享当前工作区。
    pub async fn check_link_refs(
        &self,
        refs: &[EntityRef],
        current_workspace_id: &str,
    ) -> Result<String, WorkspaceError> {
        let entities = self.load_refs(refs).await?;
        self.check_multi_entity_link(&entities, current_workspace_id)
    }

    /// 单实体访问守卫：通过返回 true；失败发出一条提示并返回 false。
    pub async fn guard_single_access(
        &self,
        kind: EntityKind,
        entity_id: &str,
        current_workspace_id: &str,
    ) -> bool {
        let span = tracing::info_span!(
            "workspace_guard",
            check_id = %new_check_id(),
            operation = "single_access",
            kind = %kind,
            entity_id,
            workspace_id = current_workspace_id
        );
        async {
            let result = self
                .check_single_access(kind, entity_id, current_workspace_id)
                .await;
            self.settle(result)
        }
        .instrument(span)
        .await
    }

    /// 多实体关联守卫：实体须共享唯一工作区且等于当前工作区。
    pub fn guard_multi_entity_link(
        &self,
        entities: &[EntityRecord],
        current_workspace_id: &str,
    ) -> bool {
        let span = tracing::info_span!(
            "workspace_guard",
            check_id = %new_check_id(),
            operation = "multi_entity_link",
            entities = entities.len(),
            workspace_id = current_workspace_id
        );
        span.in_scope(|| {
            let result = self.check_multi_entity_link(entities, current_workspace_id);
            self.settle(result)
        })
    }

    /// 按引用关联守卫（如“把文档挂到任务分配上”只持有 id 时）。
    pub async fn guard_link_refs(&self, ctx: &WorkspaceContext, refs: &[EntityRef]) -> bool {
        let span = tracing::info_span!(
            "workspace_guard",
            check_id = %new_check_id(),
            operation = "link_refs",
            entities = refs.len(),
            workspace_id = %ctx.workspace_id,
            user_id = %ctx.user_id
        );
        async {
            let result = self.check_link_refs(refs, &ctx.workspace_id).await;
            self.settle(result)
        }
        .instrument(span)
        .await
    }

    /// 结果落地：记录指标，失败时发出一条提示。
    fn settle<T>(&self, result: Result<T, WorkspaceError>) -> bool {
        match result {
            Ok(_) => {
                record_guard_allowed();
                true
            }
            Err(err) => {
                record_guard_denied(err.reason());
                tracing::debug!(error = %err, "guard denied");
                self.notifier.notify_error(&err.user_message());
                false
            }
        }
    }
}
