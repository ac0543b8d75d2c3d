//! # PostgreSQL 存储实现模块
//!
//! 本模块提供实体存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：谓词值全部使用参数绑定，防止 SQL 注入
//! 2. **固定表名**：表名来自 `EntityKind::collection()`，不接受外部输入
//! 3. **字段名校验**：排序字段需通过 `ensure_field_name` 才会拼入 SQL
//! 4. **只读**：本模块只执行查询
//!
//! ## 数据库模式要求
//!
//! 每种实体类型一张表，至少包含：
//!
//! - `id text`：实体 ID
//! - `workspace_id text null`：所属工作区
//! - `data jsonb null`：其余属性
//!
//! 表：`projects`、`assignments`、`tasks`、`documents`、`chat_messages`、`time_entries`。
//!
//! ## 索引建议
//!
//! - `(id)`：按 id 查询（归属校验）
//! - `(workspace_id)`：按工作区过滤
//!
//! ## 错误处理
//!
//! - `sqlx::Error` 自动转换为 `StorageError`
//! - `data` 列无法解析为 JSON 对象时返回 `StorageError`

pub mod entity;

pub use entity::*;
