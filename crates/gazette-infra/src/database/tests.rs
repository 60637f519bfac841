use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use gazette_core::domain::Post;
use gazette_core::ports::{BaseStore, CategoryStore};

use crate::database::entity::{category, post};
use crate::database::postgres_store::{PostgresCategoryStore, PostgresPostStore, postgres_stores};

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    // Mock the query expectation
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            title: "Test Post".to_owned(),
            body: "Body".to_owned(),
            pub_date: now.into(),
            is_published: true,
            category_id: None,
            location_id: None,
            created_at: now.into(),
        }]])
        .into_connection();

    let store = PostgresPostStore::new(Arc::new(db));

    let result: Option<Post> = BaseStore::find_by_id(&store, post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id: Uuid::new_v4(),
            title: "News".to_owned(),
            description: String::new(),
            slug: "news".to_owned(),
            is_published: true,
            created_at: now.into(),
        }]])
        .into_connection();

    let store = PostgresCategoryStore::new(Arc::new(db));

    let result = store.find_by_slug("news").await.unwrap();
    assert_eq!(result.unwrap().slug, "news");
}

#[tokio::test]
async fn test_save_inserts_a_brand_new_post() {
    let now = Utc::now();
    let fresh = Post::new(
        Uuid::new_v4(),
        "Fresh".to_owned(),
        "Body".to_owned(),
        now,
        None,
        None,
    );

    // Only a query result is queued: a `save` that issued a bare UPDATE
    // would find no matching row and fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: fresh.id,
            author_id: fresh.author_id,
            title: fresh.title.clone(),
            body: fresh.body.clone(),
            pub_date: fresh.pub_date.into(),
            is_published: fresh.is_published,
            category_id: None,
            location_id: None,
            created_at: fresh.created_at.into(),
        }]])
        .into_connection();

    let store = PostgresPostStore::new(Arc::new(db));

    let saved = BaseStore::<Post, Uuid>::save(&store, fresh.clone())
        .await
        .unwrap();
    assert_eq!(saved.id, fresh.id);
    assert_eq!(saved.title, "Fresh");
}

#[tokio::test]
async fn test_stores_share_one_connection() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id: Uuid::new_v4(),
            title: "News".to_owned(),
            description: String::new(),
            slug: "news".to_owned(),
            is_published: true,
            created_at: now.into(),
        }]])
        .into_connection();

    // Building the aggregate must not require cloning the connection.
    let stores = postgres_stores(db);

    let found = stores.categories.find_by_slug("news").await.unwrap();
    assert_eq!(found.unwrap().slug, "news");
}
