//! 过滤查询模型
//!
//! 对应远端数据层的 `filter(predicate, orderBy?, limit?)`：
//! - Predicate：字段相等 / 数组包含
//! - OrderBy：排序字段，`-field` 表示降序
//! - FilterQuery：谓词（AND）+ 排序 + 条数上限
//!
//! `id` 与 `workspace_id` 指向记录本身的列，其它字段指向 `attributes`。

use crate::error::StorageError;
use crate::validation::ensure_field_name;
use domain::EntityRecord;
use serde_json::Value;
use std::cmp::Ordering;

pub const ID_FIELD: &str = "id";
pub const WORKSPACE_FIELD: &str = "workspace_id";

/// 过滤谓词。
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// 字段值相等
    Eq { field: String, value: Value },
    /// 数组字段包含该值（外键类字段）
    Contains { field: String, value: Value },
}

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Predicate::Eq { field, .. } | Predicate::Contains { field, .. } => field,
        }
    }

    /// 判断记录是否满足谓词。
    pub fn matches(&self, record: &EntityRecord) -> bool {
        match self {
            Predicate::Eq { field, value } => field_value(record, field).as_ref() == Some(value),
            Predicate::Contains { field, value } => match field_value(record, field) {
                Some(Value::Array(items)) => items.contains(value),
                _ => false,
            },
        }
    }
}

/// 排序规则。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    /// 解析 `field` / `-field`。
    pub fn parse(value: &str) -> Result<Self, StorageError> {
        let value = value.trim();
        let (field, descending) = match value.strip_prefix('-') {
            Some(field) => (field, true),
            None => (value, false),
        };
        ensure_field_name(field)?;
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// 比较两条记录（缺失字段排在最前）。
    pub fn compare(&self, left: &EntityRecord, right: &EntityRecord) -> Ordering {
        let ordering = compare_values(
            field_value(left, &self.field).as_ref(),
            field_value(right, &self.field).as_ref(),
        );
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// 过滤查询。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub predicates: Vec<Predicate>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按 id 查询。
    pub fn by_id(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self::new().and(Predicate::eq(ID_FIELD, id))
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn ordered(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 判断记录是否满足全部谓词。
    pub fn matches(&self, record: &EntityRecord) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(record))
    }
}

/// 读取记录的字段值。
///
/// `workspace_id` 缺失时返回 `Null`，便于用 `Eq(workspace_id, null)` 查询未指定工作区的记录。
pub fn field_value(record: &EntityRecord, field: &str) -> Option<Value> {
    match field {
        ID_FIELD => Some(Value::String(record.id.clone())),
        WORKSPACE_FIELD => Some(
            record
                .workspace_id
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        ),
        _ => record.attributes.get(field).cloned(),
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                let a = a.as_f64().unwrap_or_default();
                let b = b.as_f64().unwrap_or_default();
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ => type_rank(left).cmp(&type_rank(right)),
        },
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_by_parses_descending_prefix() {
        let order = OrderBy::parse("-created_date").expect("parse");
        assert_eq!(order, OrderBy::desc("created_date"));
        assert_eq!(OrderBy::parse("name").expect("parse"), OrderBy::asc("name"));
    }

    #[test]
    fn order_by_rejects_bad_field() {
        assert!(OrderBy::parse("-").is_err());
        assert!(OrderBy::parse("name; drop table tasks").is_err());
    }

    #[test]
    fn missing_workspace_reads_as_null() {
        let record = EntityRecord::without_workspace("t-1");
        assert_eq!(field_value(&record, WORKSPACE_FIELD), Some(Value::Null));
        assert!(Predicate::eq(WORKSPACE_FIELD, Value::Null).matches(&record));
    }

    #[test]
    fn numbers_order_numerically() {
        let low = EntityRecord::new("a", "w1").with_attribute("rank", json!(2));
        let high = EntityRecord::new("b", "w1").with_attribute("rank", json!(10));
        assert_eq!(OrderBy::asc("rank").compare(&low, &high), Ordering::Less);
        assert_eq!(OrderBy::desc("rank").compare(&low, &high), Ordering::Greater);
    }
}
