use collab_storage::{
    EntityStore, FilterQuery, InMemoryEntityStore, OrderBy, Predicate, WORKSPACE_FIELD,
};
use domain::{EntityKind, EntityRecord};
use serde_json::json;

fn seeded_tasks() -> InMemoryEntityStore {
    InMemoryEntityStore::new()
        .with_records(
            EntityKind::Task,
            vec![
                EntityRecord::new("task-1", "w1")
                    .with_attribute("priority", json!(3))
                    .with_attribute("assignment_ids", json!(["as-1", "as-2"])),
                EntityRecord::new("task-2", "w1")
                    .with_attribute("priority", json!(1))
                    .with_attribute("assignment_ids", json!(["as-2"])),
                EntityRecord::new("task-3", "w2").with_attribute("priority", json!(2)),
            ],
        )
        .expect("seed")
}

#[tokio::test]
async fn filter_by_id() {
    let store = seeded_tasks();
    let found = store
        .filter(EntityKind::Task, &FilterQuery::by_id("task-2"))
        .await
        .expect("filter");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "task-2");
}

#[tokio::test]
async fn filter_unknown_id_is_empty() {
    let store = seeded_tasks();
    let found = store
        .filter(EntityKind::Task, &FilterQuery::by_id("task-404"))
        .await
        .expect("filter");
    assert!(found.is_empty());
}

#[tokio::test]
async fn filter_by_array_membership() {
    let store = seeded_tasks();
    let query = FilterQuery::new().and(Predicate::contains("assignment_ids", "as-1"));
    let found = store.filter(EntityKind::Task, &query).await.expect("filter");
    let ids: Vec<&str> = found.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["task-1"]);
}

#[tokio::test]
async fn filter_orders_and_limits() {
    let store = seeded_tasks();
    let query = FilterQuery::new()
        .and(Predicate::eq(WORKSPACE_FIELD, "w1"))
        .ordered(OrderBy::parse("-priority").expect("order"))
        .limit(1);
    let found = store.filter(EntityKind::Task, &query).await.expect("filter");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "task-1");

    let ascending = FilterQuery::new().ordered(OrderBy::asc("priority"));
    let found = store
        .filter(EntityKind::Task, &ascending)
        .await
        .expect("filter");
    let ids: Vec<&str> = found.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["task-2", "task-3", "task-1"]);
}

#[tokio::test]
async fn collections_are_isolated_by_kind() {
    let store = seeded_tasks();
    let found = store
        .filter(EntityKind::Document, &FilterQuery::by_id("task-1"))
        .await
        .expect("filter");
    assert!(found.is_empty());
}

#[tokio::test]
async fn duplicate_ids_are_kept() {
    let store = InMemoryEntityStore::new();
    store
        .insert(EntityKind::Document, EntityRecord::new("doc-1", "w1"))
        .expect("insert");
    store
        .insert(EntityKind::Document, EntityRecord::new("doc-1", "w2"))
        .expect("insert");
    let found = store
        .filter(EntityKind::Document, &FilterQuery::by_id("doc-1"))
        .await
        .expect("filter");
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn missing_collection_is_an_error() {
    let store = InMemoryEntityStore::empty();
    let err = store
        .filter(EntityKind::Project, &FilterQuery::by_id("p-1"))
        .await
        .expect_err("missing collection");
    assert_eq!(err.to_string(), "collection not found: projects");
}

#[tokio::test]
async fn invalid_field_name_is_rejected() {
    let store = seeded_tasks();
    let query = FilterQuery::new().and(Predicate::eq("title'; --", "x"));
    let err = store
        .filter(EntityKind::Task, &query)
        .await
        .expect_err("invalid field");
    assert!(err.to_string().starts_with("invalid field name"));
}

#[tokio::test]
async fn membership_on_scalar_column_is_rejected() {
    let store = seeded_tasks();
    let query = FilterQuery::new().and(Predicate::contains("id", "task-1"));
    let err = store
        .filter(EntityKind::Task, &query)
        .await
        .expect_err("scalar column");
    assert_eq!(err.to_string(), "field is not an array: id");
}
