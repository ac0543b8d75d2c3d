//! Postgres 实体存储实现
//!
//! 通过 SQL 查询实现实体过滤与探测。
//!
//! 设计要点：
//! - 谓词通过 `QueryBuilder::push_bind` 绑定
//! - `data` 以文本读取后解析为 JSON 对象

use crate::error::StorageError;
use crate::query::{FilterQuery, ID_FIELD, OrderBy, Predicate, WORKSPACE_FIELD};
use crate::traits::{EntityStore, StoreProbe};
use crate::validation::ensure_query;
use domain::{EntityKind, EntityRecord};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

pub struct PgEntityStore {
    pub pool: PgPool,
}

impl PgEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url, max_connections).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl EntityStore for PgEntityStore {
    async fn filter(
        &self,
        kind: EntityKind,
        query: &FilterQuery,
    ) -> Result<Vec<EntityRecord>, StorageError> {
        ensure_query(query)?;
        let mut builder = build_filter_query(kind, query);
        let rows = builder.build().fetch_all(&self.pool).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }
}

#[async_trait::async_trait]
impl StoreProbe for PgEntityStore {
    async fn table_exists(&self, kind: EntityKind) -> Result<bool, StorageError> {
        let exists: bool = sqlx::query_scalar(
            "select exists (select 1 from information_schema.tables \
             where table_schema = current_schema() and table_name = $1)",
        )
        .bind(kind.collection())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn current_role(&self) -> Result<Option<String>, StorageError> {
        let role: Option<String> = sqlx::query_scalar("select current_user::text")
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }
}

/// 构造过滤 SQL（调用方需先通过 `ensure_query`）。
fn build_filter_query(kind: EntityKind, query: &FilterQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "select id, workspace_id, coalesce(data::text, '{{}}') as data from {} where true",
        kind.collection()
    ));
    for predicate in &query.predicates {
        builder.push(" and ");
        push_predicate(&mut builder, predicate);
    }
    if let Some(order_by) = &query.order_by {
        push_order_by(&mut builder, order_by);
    }
    if let Some(limit) = query.limit {
        builder.push(" limit ");
        builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
    }
    builder
}

fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::Eq { field, value } if field == ID_FIELD || field == WORKSPACE_FIELD => {
            match value {
                Value::Null => {
                    builder.push(field.as_str());
                    builder.push(" is null");
                }
                value => {
                    builder.push(field.as_str());
                    builder.push(" = ");
                    builder.push_bind(scalar_text(value));
                }
            }
        }
        Predicate::Eq { field, value } => {
            builder.push("data -> ");
            builder.push_bind(field.clone());
            builder.push(" = cast(");
            builder.push_bind(value.to_string());
            builder.push(" as jsonb)");
        }
        Predicate::Contains { field, value } => {
            builder.push("data -> ");
            builder.push_bind(field.clone());
            builder.push(" @> cast(");
            builder.push_bind(Value::Array(vec![value.clone()]).to_string());
            builder.push(" as jsonb)");
        }
    }
}

fn push_order_by(builder: &mut QueryBuilder<'static, Postgres>, order_by: &OrderBy) {
    builder.push(" order by ");
    if order_by.field == ID_FIELD || order_by.field == WORKSPACE_FIELD {
        builder.push(order_by.field.as_str());
    } else {
        // 字段名已通过 ensure_field_name 校验
        builder.push(format!("data -> '{}'", order_by.field));
    }
    builder.push(if order_by.descending {
        " desc nulls last"
    } else {
        " asc nulls first"
    });
}

/// 标量列比较值（数字等非字符串按 JSON 文本比较）。
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn row_to_record(row: &PgRow) -> Result<EntityRecord, StorageError> {
    let data: String = row.try_get("data")?;
    let attributes = match serde_json::from_str::<Value>(&data)? {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        _ => return Err(StorageError::new("invalid entity data: expected object")),
    };
    Ok(EntityRecord {
        id: row.try_get("id")?,
        workspace_id: row.try_get("workspace_id")?,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_lookup_binds_value() {
        let builder = build_filter_query(EntityKind::Document, &FilterQuery::by_id("doc-1"));
        assert_eq!(
            builder.sql(),
            "select id, workspace_id, coalesce(data::text, '{}') as data from documents \
             where true and id = $1"
        );
    }

    #[test]
    fn membership_order_and_limit() {
        let query = FilterQuery::new()
            .and(Predicate::eq(WORKSPACE_FIELD, "w1"))
            .and(Predicate::contains("assignment_ids", "as-1"))
            .ordered(OrderBy::desc("created_date"))
            .limit(20);
        let builder = build_filter_query(EntityKind::Task, &query);
        assert_eq!(
            builder.sql(),
            "select id, workspace_id, coalesce(data::text, '{}') as data from tasks \
             where true and workspace_id = $1 and data -> $2 @> cast($3 as jsonb) \
             order by data -> 'created_date' desc nulls last limit $4"
        );
    }

    #[test]
    fn null_workspace_uses_is_null() {
        let query = FilterQuery::new().and(Predicate::eq(WORKSPACE_FIELD, Value::Null));
        let builder = build_filter_query(EntityKind::Project, &query);
        assert!(builder.sql().ends_with("where true and workspace_id is null"));
    }

    #[test]
    fn numeric_id_compares_as_text() {
        assert_eq!(scalar_text(&json!(1)), "1");
        assert_eq!(scalar_text(&json!("doc-1")), "doc-1");
    }
}
