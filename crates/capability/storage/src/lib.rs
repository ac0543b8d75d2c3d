//! # Collab Storage 模块
//!
//! 本模块提供实体读取的统一抽象层，对应远端数据层的 `filter` 接口。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`EntityStore`（过滤读取）与 `StoreProbe`（连通性探测）
//! 2. **查询模型层** (`query.rs`)：谓词、排序、条数限制
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：字段名与谓词校验
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **探测层** (`probe.rs`)：表存在性与认证角色检查
//! 7. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 核心特性
//!
//! - **只读**：存储接口只暴露读取，实体的增删改由外部数据层负责
//! - **类型安全**：实体类型是枚举，集合名不接受外部字符串
//! - **异步支持**：基于 Tokio 的异步 I/O
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use collab_storage::{EntityStore, FilterQuery, InMemoryEntityStore};
//! use domain::{EntityKind, EntityRecord};
//!
//! let store = InMemoryEntityStore::new();
//! store.insert(EntityKind::Document, EntityRecord::new("doc-1", "w1"))?;
//! let found = store.filter(EntityKind::Document, &FilterQuery::by_id("doc-1")).await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod probe;
pub mod query;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use probe::*;
pub use query::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::InMemoryEntityStore;
pub use postgres::PgEntityStore;
