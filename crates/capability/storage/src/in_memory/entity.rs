//! 实体内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按实体类型分集合存储
//! - 谓词过滤、排序、条数限制
//! - 允许重复 id（用于复现后端数据异常）

use crate::error::StorageError;
use crate::query::FilterQuery;
use crate::traits::{EntityStore, StoreProbe};
use crate::validation::ensure_query;
use domain::{EntityKind, EntityRecord};
use std::collections::HashMap;
use std::sync::RwLock;

/// 实体内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryEntityStore {
    collections: RwLock<HashMap<EntityKind, Vec<EntityRecord>>>,
}

impl InMemoryEntityStore {
    /// 创建包含全部集合（均为空）的存储。
    pub fn new() -> Self {
        let collections = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// 创建不含任何集合的存储（探测时所有表均缺失）。
    pub fn empty() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// 写入实体（集合不存在时自动创建）。
    ///
    /// 不检查 id 唯一性。
    pub fn insert(&self, kind: EntityKind, record: EntityRecord) -> Result<(), StorageError> {
        let mut map = self
            .collections
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.entry(kind).or_default().push(record);
        Ok(())
    }

    /// 批量写入实体。
    pub fn with_records(
        self,
        kind: EntityKind,
        records: impl IntoIterator<Item = EntityRecord>,
    ) -> Result<Self, StorageError> {
        for record in records {
            self.insert(kind, record)?;
        }
        Ok(self)
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EntityStore for InMemoryEntityStore {
    /// 过滤指定类型的实体
    async fn filter(
        &self,
        kind: EntityKind,
        query: &FilterQuery,
    ) -> Result<Vec<EntityRecord>, StorageError> {
        ensure_query(query)?;
        let map = self
            .collections
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let Some(records) = map.get(&kind) else {
            return Err(StorageError::new(format!(
                "collection not found: {}",
                kind.collection()
            )));
        };
        let mut items: Vec<EntityRecord> = records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        if let Some(order_by) = &query.order_by {
            // 稳定排序：相等时保留插入顺序
            items.sort_by(|left, right| order_by.compare(left, right));
        }
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        Ok(items)
    }
}

#[async_trait::async_trait]
impl StoreProbe for InMemoryEntityStore {
    async fn table_exists(&self, kind: EntityKind) -> Result<bool, StorageError> {
        let map = self
            .collections
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.contains_key(&kind))
    }

    async fn current_role(&self) -> Result<Option<String>, StorageError> {
        Ok(None)
    }
}
