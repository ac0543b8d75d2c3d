//! 连通性探测
//!
//! 逐一检查每种实体类型的集合是否存在，并记录当前认证角色。
//! 任何一次查询失败都会直接返回错误（连接不可用）。

use crate::error::StorageError;
use crate::traits::StoreProbe;
use domain::EntityKind;
use serde::Serialize;

/// 单个集合的探测结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    pub kind: EntityKind,
    pub table: String,
    pub exists: bool,
}

/// 探测报告。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub tables: Vec<TableStatus>,
    pub role: Option<String>,
}

impl ProbeReport {
    /// 全部集合均存在。
    pub fn is_healthy(&self) -> bool {
        self.tables.iter().all(|status| status.exists)
    }

    /// 缺失的集合名。
    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|status| !status.exists)
            .map(|status| status.table.as_str())
            .collect()
    }
}

/// 探测存储。
pub async fn probe_store(probe: &dyn StoreProbe) -> Result<ProbeReport, StorageError> {
    let mut tables = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        let exists = probe.table_exists(kind).await?;
        if exists {
            tracing::debug!(table = kind.collection(), "table present");
        } else {
            tracing::warn!(table = kind.collection(), "table missing");
        }
        tables.push(TableStatus {
            kind,
            table: kind.collection().to_string(),
            exists,
        });
    }
    let role = probe.current_role().await?;
    tracing::info!(role = role.as_deref().unwrap_or("-"), "store probed");
    Ok(ProbeReport { tables, role })
}
