//! 验证辅助函数
//!
//! 提供统一的查询验证逻辑：
//! - ensure_field_name：字段名必须是标识符
//! - ensure_query：校验谓词与排序字段
//!
//! 使用场景：
//! - 所有存储实现执行过滤前验证查询
//! - Postgres 实现依赖字段名校验拼接 JSON 路径

use crate::error::StorageError;
use crate::query::{FilterQuery, ID_FIELD, Predicate, WORKSPACE_FIELD};

/// 验证字段名为标识符（`[A-Za-z_][A-Za-z0-9_]*`）
pub fn ensure_field_name(field: &str) -> Result<(), StorageError> {
    let mut chars = field.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(StorageError::new(format!("invalid field name: {field:?}")));
    }
    Ok(())
}

/// 验证过滤查询
///
/// `id` 与 `workspace_id` 是标量列，不支持数组包含谓词。
pub fn ensure_query(query: &FilterQuery) -> Result<(), StorageError> {
    for predicate in &query.predicates {
        ensure_field_name(predicate.field())?;
        if let Predicate::Contains { field, .. } = predicate {
            if field == ID_FIELD || field == WORKSPACE_FIELD {
                return Err(StorageError::new(format!("field is not an array: {field}")));
            }
        }
    }
    if let Some(order_by) = &query.order_by {
        ensure_field_name(&order_by.field)?;
    }
    Ok(())
}
