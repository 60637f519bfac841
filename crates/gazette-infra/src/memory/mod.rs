//! In-memory entity store - used as fallback when Postgres is unavailable
//! and as the harness for engine tests.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gazette_core::domain::{Category, Comment, Location, Post, User};
use gazette_core::error::StoreError;
use gazette_core::ports::{
    BaseStore, CategoryStore, CommentStore, LocationStore, PostStore, Stores, UserStore,
};

#[derive(Default)]
struct State {
    posts: HashMap<Uuid, Post>,
    categories: HashMap<Uuid, Category>,
    locations: HashMap<Uuid, Location>,
    comments: HashMap<Uuid, Comment>,
    users: HashMap<Uuid, User>,
}

/// In-memory store backed by HashMaps behind an async RwLock.
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Hand out one `Stores` aggregate backed by this instance.
    pub fn stores(self: &Arc<Self>) -> Stores {
        Stores {
            posts: Arc::clone(self) as Arc<dyn PostStore>,
            categories: Arc::clone(self) as Arc<dyn CategoryStore>,
            locations: Arc::clone(self) as Arc<dyn LocationStore>,
            comments: Arc::clone(self) as Arc<dyn CommentStore>,
            users: Arc::clone(self) as Arc<dyn UserStore>,
        }
    }

    // Category/location/user records are administered outside the engine;
    // these seeding methods stand in for that back office.

    pub async fn insert_user(&self, user: User) {
        self.state.write().await.users.insert(user.id, user);
    }

    pub async fn insert_category(&self, category: Category) {
        self.state
            .write()
            .await
            .categories
            .insert(category.id, category);
    }

    pub async fn insert_location(&self, location: Location) {
        self.state
            .write()
            .await
            .locations
            .insert(location.id, location);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseStore<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, StoreError> {
        self.state.write().await.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.posts.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        // Cascade: a post takes its comments with it.
        state.comments.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.state.read().await.posts.values().cloned().collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseStore<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, StoreError> {
        self.state
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        if self.state.write().await.comments.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<Comment> = self
            .state
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn find_in_post(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .comments
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .cloned())
    }

    async fn count_by_post(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, StoreError> {
        let state = self.state.read().await;
        let mut counts = HashMap::new();
        for comment in state.comments.values() {
            if post_ids.contains(&comment.post_id) {
                *counts.entry(comment.post_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl CategoryStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(self.state.read().await.categories.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, StoreError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.categories.get(id).cloned())
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .categories
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, StoreError> {
        Ok(self.state.read().await.locations.get(&id).cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn save(&self, user: User) -> Result<User, StoreError> {
        self.state.write().await.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests;
