//! PostgreSQL store implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use gazette_core::domain::{Category, Comment, Location, Post, User};
use gazette_core::error::StoreError;
use gazette_core::ports::{
    BaseStore, CategoryStore, CommentStore, LocationStore, PostStore, Stores, UserStore,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::Entity as LocationEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseStore;

/// PostgreSQL post store.
pub type PostgresPostStore = PostgresBaseStore<PostEntity>;

/// PostgreSQL comment store.
pub type PostgresCommentStore = PostgresBaseStore<CommentEntity>;

/// PostgreSQL category store.
pub type PostgresCategoryStore = PostgresBaseStore<CategoryEntity>;

/// PostgreSQL location store.
pub type PostgresLocationStore = PostgresBaseStore<LocationEntity>;

/// PostgreSQL user store.
pub type PostgresUserStore = PostgresBaseStore<UserEntity>;

/// Wire up one `Stores` aggregate over a shared connection.
pub fn postgres_stores(db: DbConn) -> Stores {
    let db = Arc::new(db);
    Stores {
        posts: Arc::new(PostgresPostStore::new(Arc::clone(&db))),
        categories: Arc::new(PostgresCategoryStore::new(Arc::clone(&db))),
        locations: Arc::new(PostgresLocationStore::new(Arc::clone(&db))),
        comments: Arc::new(PostgresCommentStore::new(Arc::clone(&db))),
        users: Arc::new(PostgresUserStore::new(db)),
    }
}

fn query_err(e: sea_orm::DbErr) -> StoreError {
    StoreError::Query(e.to_string())
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let result = PostEntity::find().all(self.db.as_ref()).await.map_err(query_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, StoreError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, StoreError> {
        let result = PostEntity::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_in_post(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError> {
        let result = CommentEntity::find_by_id(comment_id)
            .filter(comment::Column::PostId.eq(post_id))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_by_post(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, StoreError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "count")
            .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
            .group_by(comment::Column::PostId)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|(post_id, count)| (post_id, count.max(0) as u64))
            .collect())
    }
}

#[async_trait]
impl CategoryStore for PostgresCategoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let result = CategoryEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, StoreError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        tracing::debug!(category_slug = %slug, "Resolving category by slug");

        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl LocationStore for PostgresLocationStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, StoreError> {
        let result = LocationEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        BaseStore::<User, Uuid>::find_by_id(self, id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, user: User) -> Result<User, StoreError> {
        BaseStore::<User, Uuid>::save(self, user).await
    }
}
