//! 实体与实体类型。
//!
//! - EntityKind：受支持的实体类型（显式枚举，避免字符串动态分发）
//! - EntityRecord：不透明实体记录（id + workspace_id + 属性）
//! - EntityRef：按类型 + id 引用实体

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 受支持的实体类型。
///
/// 每种类型对应远端数据层中的一个集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Assignment,
    Task,
    Document,
    ChatMessage,
    TimeEntry,
}

impl EntityKind {
    /// 全部实体类型（探测表存在性时逐一检查）。
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Project,
        EntityKind::Assignment,
        EntityKind::Task,
        EntityKind::Document,
        EntityKind::ChatMessage,
        EntityKind::TimeEntry,
    ];

    /// 集合（表）名。
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Project => "projects",
            EntityKind::Assignment => "assignments",
            EntityKind::Task => "tasks",
            EntityKind::Document => "documents",
            EntityKind::ChatMessage => "chat_messages",
            EntityKind::TimeEntry => "time_entries",
        }
    }

    /// 面向用户的名称（用于提示消息）。
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Assignment => "assignment",
            EntityKind::Task => "task",
            EntityKind::Document => "document",
            EntityKind::ChatMessage => "chat message",
            EntityKind::TimeEntry => "time entry",
        }
    }

    /// 前端 SDK 中的实体名。
    pub fn entity_name(self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Assignment => "Assignment",
            EntityKind::Task => "Task",
            EntityKind::Document => "Document",
            EntityKind::ChatMessage => "ChatMessage",
            EntityKind::TimeEntry => "TimeEntry",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 无法识别的实体类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type: {0}")]
pub struct ParseEntityKindError(pub String);

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    /// 接受名称、集合名或 SDK 实体名（不区分大小写）。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                needle.eq_ignore_ascii_case(kind.label())
                    || needle.eq_ignore_ascii_case(kind.collection())
                    || needle.eq_ignore_ascii_case(kind.entity_name())
            })
            .ok_or_else(|| ParseEntityKindError(value.to_string()))
    }
}

/// 实体记录。
///
/// 核心逻辑只解读 `id` 与 `workspace_id`；`attributes` 仅供过滤谓词使用。
/// `workspace_id` 可能缺失，缺失即“未指定”，不会被默认填充。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl EntityRecord {
    /// 构造归属指定工作区的实体。
    pub fn new(id: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            workspace_id: Some(workspace_id.into()),
            attributes: serde_json::Map::new(),
        }
    }

    /// 构造未指定工作区的实体。
    pub fn without_workspace(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            workspace_id: None,
            attributes: serde_json::Map::new(),
        }
    }

    /// 追加属性。
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// 工作区 ID（空字符串视为未指定）。
    pub fn workspace(&self) -> Option<&str> {
        self.workspace_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// 实体引用（类型 + id）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
