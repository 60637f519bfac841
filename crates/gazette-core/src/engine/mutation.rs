//! Mutation services: resolve, authorize, proceed.
//!
//! Every update/delete runs the same three steps: look the target up
//! (absent -> `NotFound`), check ownership (`require_owner`, mismatch ->
//! `Denied` with the parent post as redirect target), then execute. The
//! store is only written after authorization succeeds.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::EngineError;

use super::Engine;
use super::guard::require_owner;

/// Author-editable post fields. The author itself is never part of the
/// payload - it is fixed at creation.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
}

/// Comment payload.
#[derive(Debug, Clone)]
pub struct CommentInput {
    pub text: String,
}

/// Profile fields a user may edit on their own record.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Engine {
    pub async fn create_post(
        &self,
        requester_id: Uuid,
        input: PostInput,
    ) -> Result<Post, EngineError> {
        self.validate_post_input(&input).await?;

        let mut post = Post::new(
            requester_id,
            input.title,
            input.body,
            input.pub_date,
            input.category_id,
            input.location_id,
        );
        post.is_published = input.is_published;

        Ok(self.stores().posts.save(post).await?)
    }

    pub async fn update_post(
        &self,
        post_id: Uuid,
        requester_id: Uuid,
        input: PostInput,
    ) -> Result<Post, EngineError> {
        let mut post = self.resolve_post(post_id).await?;
        require_owner(post.author_id, requester_id, post.id)?;
        self.validate_post_input(&input).await?;

        post.title = input.title;
        post.body = input.body;
        post.pub_date = input.pub_date;
        post.is_published = input.is_published;
        post.category_id = input.category_id;
        post.location_id = input.location_id;

        Ok(self.stores().posts.save(post).await?)
    }

    /// Delete a post. Its comments go with it (store cascade).
    pub async fn delete_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<(), EngineError> {
        let post = self.resolve_post(post_id).await?;
        require_owner(post.author_id, requester_id, post.id)?;

        Ok(self.stores().posts.delete(post.id).await?)
    }

    /// Comment on a post. The parent is resolved by bare id, matching the
    /// original route behavior.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        requester_id: Uuid,
        input: CommentInput,
    ) -> Result<Comment, EngineError> {
        if input.text.trim().is_empty() {
            return Err(EngineError::InvalidInput("comment text is empty".into()));
        }

        let post = self.resolve_post(post_id).await?;
        let comment = Comment::new(post.id, requester_id, input.text);
        Ok(self.stores().comments.save(comment).await?)
    }

    pub async fn update_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        requester_id: Uuid,
        input: CommentInput,
    ) -> Result<Comment, EngineError> {
        if input.text.trim().is_empty() {
            return Err(EngineError::InvalidInput("comment text is empty".into()));
        }

        let mut comment = self.resolve_comment(post_id, comment_id).await?;
        require_owner(comment.author_id, requester_id, comment.post_id)?;

        comment.text = input.text;
        Ok(self.stores().comments.save(comment).await?)
    }

    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        requester_id: Uuid,
    ) -> Result<(), EngineError> {
        let comment = self.resolve_comment(post_id, comment_id).await?;
        require_owner(comment.author_id, requester_id, comment.post_id)?;

        Ok(self.stores().comments.delete(comment.id).await?)
    }

    /// Update the requester's own profile fields.
    pub async fn update_profile(
        &self,
        requester_id: Uuid,
        input: ProfileInput,
    ) -> Result<User, EngineError> {
        let mut user = self
            .stores()
            .users
            .find_by_id(requester_id)
            .await?
            .ok_or(EngineError::not_found("user"))?;

        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;

        Ok(self.stores().users.save(user).await?)
    }

    async fn resolve_post(&self, post_id: Uuid) -> Result<Post, EngineError> {
        self.stores()
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(EngineError::not_found("post"))
    }

    /// Composite-key resolution: a comment id under the wrong post is as
    /// good as missing.
    async fn resolve_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, EngineError> {
        self.stores()
            .comments
            .find_in_post(post_id, comment_id)
            .await?
            .ok_or(EngineError::not_found("comment"))
    }

    async fn validate_post_input(&self, input: &PostInput) -> Result<(), EngineError> {
        if input.title.trim().is_empty() {
            return Err(EngineError::InvalidInput("title is empty".into()));
        }
        if input.body.trim().is_empty() {
            return Err(EngineError::InvalidInput("body is empty".into()));
        }

        if let Some(id) = input.category_id {
            if self.stores().categories.find_by_id(id).await?.is_none() {
                return Err(EngineError::InvalidInput("unknown category".into()));
            }
        }
        if let Some(id) = input.location_id {
            if self.stores().locations.find_by_id(id).await?.is_none() {
                return Err(EngineError::InvalidInput("unknown location".into()));
            }
        }

        Ok(())
    }
}
