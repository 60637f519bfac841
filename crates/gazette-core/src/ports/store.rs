use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, User};
use crate::error::StoreError;

/// Generic store trait for the entities the engine mutates.
#[async_trait]
pub trait BaseStore<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, StoreError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), StoreError>;
}

/// Post store.
#[async_trait]
pub trait PostStore: BaseStore<Post, Uuid> {
    /// Every post in the store, unfiltered. Visibility is applied by the
    /// engine, not here.
    async fn list_all(&self) -> Result<Vec<Post>, StoreError>;

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, StoreError>;

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, StoreError>;
}

/// Comment store. Deleting a post must remove its comments (cascade).
#[async_trait]
pub trait CommentStore: BaseStore<Comment, Uuid> {
    /// All comments on a post, ascending by `created_at`.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError>;

    /// Composite-key lookup. A comment id that exists under a different
    /// post resolves to `None`.
    async fn find_in_post(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError>;

    /// Comment counts for a batch of posts. Posts with no comments may be
    /// absent from the map.
    async fn count_by_post(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, StoreError>;
}

/// Category store - read only; category lifecycle is administrative.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, StoreError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError>;
}

/// Location store - read only, display use.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, StoreError>;
}

/// User store with profile updates.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn save(&self, user: User) -> Result<User, StoreError>;
}

/// Aggregate of store handles the engine works against.
#[derive(Clone)]
pub struct Stores {
    pub posts: Arc<dyn PostStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub locations: Arc<dyn LocationStore>,
    pub comments: Arc<dyn CommentStore>,
    pub users: Arc<dyn UserStore>,
}
