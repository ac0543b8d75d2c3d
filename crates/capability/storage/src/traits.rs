//! 存储接口 Trait 定义
//!
//! - EntityStore：按实体类型过滤读取实体
//! - StoreProbe：连通性探测（表存在性、认证身份）
//!
//! 设计原则：
//! - 实体类型使用 `EntityKind` 枚举，不接受任意集合名
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::query::FilterQuery;
use async_trait::async_trait;
use domain::{EntityKind, EntityRecord};

/// 实体存储接口
///
/// 只读：守卫逻辑从不创建、修改或删除实体。
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// 按谓词过滤指定类型的实体（可排序、可限制条数）
    async fn filter(
        &self,
        kind: EntityKind,
        query: &FilterQuery,
    ) -> Result<Vec<EntityRecord>, StorageError>;
}

/// 存储探测接口
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// 实体类型对应的集合（表）是否存在
    async fn table_exists(&self, kind: EntityKind) -> Result<bool, StorageError>;

    /// 当前连接认证的角色（后端无此概念时返回 None）
    async fn current_role(&self) -> Result<Option<String>, StorageError>;
}
