use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use gazette_core::Engine;
use gazette_core::EngineError;
use gazette_core::domain::{Category, Comment, Post, User};
use gazette_core::engine::{CommentInput, PostInput, Viewer};
use gazette_core::ports::{BaseStore, CommentStore};

use super::InMemoryStore;

fn setup() -> (Arc<InMemoryStore>, Engine) {
    let store = Arc::new(InMemoryStore::new());
    let engine = Engine::new(store.stores());
    (store, engine)
}

async fn seed_user(store: &InMemoryStore, username: &str) -> User {
    let user = User::new(username.to_owned(), format!("{username}@example.com"));
    store.insert_user(user.clone()).await;
    user
}

async fn seed_category(store: &InMemoryStore, slug: &str, published: bool) -> Category {
    let mut category = Category::new(slug.to_owned(), String::new(), slug.to_owned());
    category.is_published = published;
    store.insert_category(category.clone()).await;
    category
}

async fn seed_post(
    store: &InMemoryStore,
    author: &User,
    pub_date: DateTime<Utc>,
    category_id: Option<Uuid>,
) -> Post {
    let post = Post::new(
        author.id,
        "title".to_owned(),
        "body".to_owned(),
        pub_date,
        category_id,
        None,
    );
    BaseStore::<Post, Uuid>::save(store, post.clone())
        .await
        .unwrap();
    post
}

// `save`/`find_by_id` exist on several store traits, so spell the trait out.
async fn save_comment(store: &InMemoryStore, comment: Comment) -> Comment {
    BaseStore::<Comment, Uuid>::save(store, comment)
        .await
        .unwrap()
}

fn post_input(pub_date: DateTime<Utc>) -> PostInput {
    PostInput {
        title: "title".to_owned(),
        body: "body".to_owned(),
        pub_date,
        is_published: true,
        category_id: None,
        location_id: None,
    }
}

#[tokio::test]
async fn scheduled_post_hidden_from_global_feed_but_in_own_profile() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let post = seed_post(&store, &author, now + TimeDelta::days(1), None).await;

    let feed = engine.global_feed(now, None).await.unwrap();
    assert!(feed.items.is_empty());

    let profile = engine
        .author_feed("alice", Viewer::User(author.id), now, None)
        .await
        .unwrap();
    assert_eq!(profile.page.items.len(), 1);
    assert_eq!(profile.page.items[0].post.id, post.id);

    // Another viewer browsing the same profile sees nothing.
    let other = seed_user(&store, "bob").await;
    let profile = engine
        .author_feed("alice", Viewer::User(other.id), now, None)
        .await
        .unwrap();
    assert!(profile.page.items.is_empty());
}

#[tokio::test]
async fn unpublished_category_hides_published_post_everywhere() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let news = seed_category(&store, "news", false).await;
    seed_post(&store, &author, now - TimeDelta::days(1), Some(news.id)).await;

    // Category feed lookup itself fails: slug existence is not enough.
    let err = engine.category_feed("news", now, None).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "category" }));

    // Global feed excludes the post too.
    let feed = engine.global_feed(now, None).await.unwrap();
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn category_feed_scopes_to_published_category() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let news = seed_category(&store, "news", true).await;
    let sport = seed_category(&store, "sport", true).await;
    let in_news = seed_post(&store, &author, now - TimeDelta::hours(2), Some(news.id)).await;
    seed_post(&store, &author, now - TimeDelta::hours(1), Some(sport.id)).await;
    seed_post(&store, &author, now - TimeDelta::hours(3), None).await;

    let feed = engine.category_feed("news", now, None).await.unwrap();
    assert_eq!(feed.category.id, news.id);
    assert_eq!(feed.page.items.len(), 1);
    assert_eq!(feed.page.items[0].post.id, in_news.id);

    let err = engine.category_feed("missing", now, None).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn global_feed_is_the_visible_subset_newest_first() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;

    let older = seed_post(&store, &author, now - TimeDelta::hours(3), None).await;
    let newer = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;

    // A draft never reaches the feed, not even for its author's session -
    // the global surface is always the anonymous view.
    let mut draft = Post::new(
        author.id,
        "draft".to_owned(),
        "body".to_owned(),
        now - TimeDelta::hours(2),
        None,
        None,
    );
    draft.is_published = false;
    BaseStore::<Post, Uuid>::save(&*store, draft).await.unwrap();

    let feed = engine.global_feed(now, None).await.unwrap();
    let ids: Vec<Uuid> = feed.items.iter().map(|e| e.post.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn page_overflow_falls_back_to_last_page() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    for i in 0..23 {
        seed_post(&store, &author, now - TimeDelta::minutes(i), None).await;
    }

    let page = engine.global_feed(now, Some(5)).await.unwrap();
    assert_eq!(page.current_page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 3);
    assert!(!page.has_next);
    assert!(page.has_previous);

    let last = engine.global_feed(now, Some(3)).await.unwrap();
    let overflow_ids: Vec<Uuid> = page.items.iter().map(|e| e.post.id).collect();
    let last_ids: Vec<Uuid> = last.items.iter().map(|e| e.post.id).collect();
    assert_eq!(overflow_ids, last_ids);
}

#[tokio::test]
async fn feed_entries_carry_comment_counts() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let reader = seed_user(&store, "bob").await;
    let commented = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;
    let silent = seed_post(&store, &author, now - TimeDelta::hours(2), None).await;

    for _ in 0..3 {
        save_comment(&store, Comment::new(commented.id, reader.id, "!".to_owned())).await;
    }

    let feed = engine.global_feed(now, None).await.unwrap();
    let count_of = |id: Uuid| {
        feed.items
            .iter()
            .find(|e| e.post.id == id)
            .map(|e| e.comment_count)
            .unwrap()
    };
    assert_eq!(count_of(commented.id), 3);
    assert_eq!(count_of(silent.id), 0);
}

#[tokio::test]
async fn post_detail_hides_existence_from_unauthorized_viewers() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let post = seed_post(&store, &author, now + TimeDelta::days(1), None).await;

    let err = engine
        .post_detail(post.id, Viewer::Anonymous, now)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "post" }));

    let detail = engine
        .post_detail(post.id, Viewer::User(author.id), now)
        .await
        .unwrap();
    assert_eq!(detail.post.id, post.id);
}

#[tokio::test]
async fn post_detail_comments_are_oldest_first() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let reader = seed_user(&store, "bob").await;
    let post = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;

    let mut first = Comment::new(post.id, reader.id, "first".to_owned());
    first.created_at = now - TimeDelta::minutes(30);
    let mut second = Comment::new(post.id, reader.id, "second".to_owned());
    second.created_at = now - TimeDelta::minutes(10);
    // Insert newest first to prove the store orders, not insertion.
    save_comment(&store, second.clone()).await;
    save_comment(&store, first.clone()).await;

    let detail = engine
        .post_detail(post.id, Viewer::Anonymous, now)
        .await
        .unwrap();
    let texts: Vec<&str> = detail.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn comment_id_is_scoped_to_its_post() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let post_a = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;
    let post_b = seed_post(&store, &author, now - TimeDelta::hours(2), None).await;
    let comment = save_comment(&store, Comment::new(post_a.id, author.id, "hi".to_owned())).await;

    // Guessing the comment id under a different post resolves to nothing.
    let err = engine
        .delete_comment(post_b.id, comment.id, author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "comment" }));

    assert!(
        store
            .find_in_post(post_a.id, comment.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn post_ownership_does_not_grant_comment_ownership() {
    let (store, engine) = setup();
    let now = Utc::now();
    let post_author = seed_user(&store, "alice").await;
    let commenter = seed_user(&store, "bob").await;
    let post = seed_post(&store, &post_author, now - TimeDelta::hours(1), None).await;
    let comment = save_comment(&store, Comment::new(post.id, commenter.id, "mine".to_owned())).await;

    // The post's author tries to delete someone else's comment.
    let err = engine
        .delete_comment(post.id, comment.id, post_author.id)
        .await
        .unwrap_err();
    match err {
        EngineError::Denied { post_id } => assert_eq!(post_id, post.id),
        other => panic!("expected Denied, got {other:?}"),
    }
    assert!(
        store
            .find_in_post(post.id, comment.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn denied_comment_update_leaves_text_unchanged() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let intruder = seed_user(&store, "mallory").await;
    let post = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;
    let comment = save_comment(&store, Comment::new(post.id, author.id, "original".to_owned())).await;

    let err = engine
        .update_comment(
            post.id,
            comment.id,
            intruder.id,
            CommentInput {
                text: "defaced".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Denied { .. }));

    let fetched = store
        .find_in_post(post.id, comment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.text, "original");
}

#[tokio::test]
async fn non_author_post_mutation_is_denied_with_redirect() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let intruder = seed_user(&store, "mallory").await;
    let post = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;

    let err = engine
        .update_post(post.id, intruder.id, post_input(post.pub_date))
        .await
        .unwrap_err();
    match err {
        EngineError::Denied { post_id } => assert_eq!(post_id, post.id),
        other => panic!("expected Denied, got {other:?}"),
    }

    let err = engine.delete_post(post.id, intruder.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Denied { .. }));
    assert!(
        BaseStore::<Post, Uuid>::find_by_id(&*store, post.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn deleting_a_post_cascades_to_its_comments() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;
    let post = seed_post(&store, &author, now - TimeDelta::hours(1), None).await;
    let comment = save_comment(&store, Comment::new(post.id, author.id, "hi".to_owned())).await;

    engine.delete_post(post.id, author.id).await.unwrap();

    assert!(
        BaseStore::<Comment, Uuid>::find_by_id(&*store, comment.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn create_post_validates_input() {
    let (store, engine) = setup();
    let now = Utc::now();
    let author = seed_user(&store, "alice").await;

    let mut blank = post_input(now);
    blank.title = "   ".to_owned();
    let err = engine.create_post(author.id, blank).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let mut dangling = post_input(now);
    dangling.category_id = Some(Uuid::new_v4());
    let err = engine.create_post(author.id, dangling).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let post = engine.create_post(author.id, post_input(now)).await.unwrap();
    assert_eq!(post.author_id, author.id);
}

#[tokio::test]
async fn mutations_on_missing_targets_are_not_found() {
    let (store, engine) = setup();
    let author = seed_user(&store, "alice").await;

    let err = engine
        .delete_post(Uuid::new_v4(), author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "post" }));

    let err = engine
        .add_comment(
            Uuid::new_v4(),
            author.id,
            CommentInput {
                text: "hi".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "post" }));
}

#[tokio::test]
async fn profile_update_edits_own_fields() {
    let (store, engine) = setup();
    let user = seed_user(&store, "alice").await;

    let updated = engine
        .update_profile(
            user.id,
            gazette_core::engine::ProfileInput {
                first_name: "Alice".to_owned(),
                last_name: "Liddell".to_owned(),
                email: "alice@wonder.land".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Alice");
    assert_eq!(updated.username, "alice");
}
