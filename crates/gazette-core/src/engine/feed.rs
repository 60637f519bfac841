//! The query composer: the four read surfaces.
//!
//! Each surface is built the same way: pull the candidate set from the
//! store, filter it through the visibility policy against live category
//! records, annotate with comment counts, order newest first, paginate.
//! Nothing is memoized between calls.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, User};
use crate::error::EngineError;

use super::page::{POSTS_PER_PAGE, Page, paginate};
use super::visibility::{Viewer, is_visible};
use super::Engine;

/// One post in a feed, annotated with its comment count.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub post: Post,
    pub comment_count: u64,
}

/// Category feed: the resolved category plus its page of posts.
#[derive(Debug, Clone)]
pub struct CategoryFeed {
    pub category: Category,
    pub page: Page<FeedEntry>,
}

/// Author feed: the profiled user plus their page of posts.
#[derive(Debug, Clone)]
pub struct ProfileFeed {
    pub profile: User,
    pub page: Page<FeedEntry>,
}

/// Single-post view: the post plus its full comment thread, oldest first.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

impl Engine {
    /// The public home feed. Always evaluated as an anonymous viewer:
    /// the global surface never shows drafts or scheduled posts, even to
    /// their logged-in authors.
    pub async fn global_feed(
        &self,
        now: DateTime<Utc>,
        page: Option<usize>,
    ) -> Result<Page<FeedEntry>, EngineError> {
        let posts = self.stores().posts.list_all().await?;
        let visible = self.visible_subset(posts, Viewer::Anonymous, now).await?;
        self.compose(visible, page).await
    }

    /// Posts in one category, resolved by slug. An absent *or unpublished*
    /// category is `NotFound` - slug existence alone is not enough.
    pub async fn category_feed(
        &self,
        slug: &str,
        now: DateTime<Utc>,
        page: Option<usize>,
    ) -> Result<CategoryFeed, EngineError> {
        let category = self
            .stores()
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or(EngineError::not_found("category"))?;

        let posts = self.stores().posts.list_by_category(category.id).await?;
        let visible = self.visible_subset(posts, Viewer::Anonymous, now).await?;
        let page = self.compose(visible, page).await?;

        Ok(CategoryFeed { category, page })
    }

    /// One author's posts. The owner sees everything they wrote, drafts
    /// and future-dated posts included; everyone else gets the full
    /// visibility filter.
    pub async fn author_feed(
        &self,
        username: &str,
        viewer: Viewer,
        now: DateTime<Utc>,
        page: Option<usize>,
    ) -> Result<ProfileFeed, EngineError> {
        let profile = self
            .stores()
            .users
            .find_by_username(username)
            .await?
            .ok_or(EngineError::not_found("user"))?;

        let posts = self.stores().posts.list_by_author(profile.id).await?;
        let visible = if viewer.is(profile.id) {
            posts
        } else {
            self.visible_subset(posts, viewer, now).await?
        };
        let page = self.compose(visible, page).await?;

        Ok(ProfileFeed { profile, page })
    }

    /// Resolve one post with its comment thread. An invisible post is
    /// indistinguishable from a missing one.
    pub async fn post_detail(
        &self,
        post_id: Uuid,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<PostDetail, EngineError> {
        let post = self
            .stores()
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(EngineError::not_found("post"))?;

        let category = match post.category_id {
            Some(id) => self.stores().categories.find_by_id(id).await?,
            None => None,
        };

        if !is_visible(&post, category.as_ref(), viewer, now) {
            return Err(EngineError::not_found("post"));
        }

        let comments = self.stores().comments.list_for_post(post.id).await?;

        Ok(PostDetail { post, comments })
    }

    /// Filter a candidate set through the visibility policy, fetching the
    /// live category records the gate needs in one batch.
    async fn visible_subset(
        &self,
        posts: Vec<Post>,
        viewer: Viewer,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, EngineError> {
        let category_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };

        let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            self.stores()
                .categories
                .find_by_ids(&category_ids)
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect()
        };

        Ok(posts
            .into_iter()
            .filter(|post| {
                let category = post.category_id.and_then(|id| categories.get(&id));
                is_visible(post, category, viewer, now)
            })
            .collect())
    }

    /// Annotate with comment counts, order newest first, slice one page.
    /// Ordering carries explicit tiebreaks so pagination is stable across
    /// requests.
    async fn compose(
        &self,
        mut posts: Vec<Post>,
        page: Option<usize>,
    ) -> Result<Page<FeedEntry>, EngineError> {
        posts.sort_by(|a, b| {
            b.pub_date
                .cmp(&a.pub_date)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });

        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let counts = self.stores().comments.count_by_post(&ids).await?;

        let entries = posts
            .into_iter()
            .map(|post| {
                let comment_count = counts.get(&post.id).copied().unwrap_or(0);
                FeedEntry {
                    post,
                    comment_count,
                }
            })
            .collect();

        Ok(paginate(entries, POSTS_PER_PAGE, page))
    }
}
