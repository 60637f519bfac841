//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for creating or replacing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
}

fn default_true() -> bool {
    true
}

/// Request body for creating or editing a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub text: String,
}

/// Request body for editing one's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A post as returned by listing and detail surfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A feed entry: a post plus its comment count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntryResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comment_count: u64,
}

/// A paginated feed with navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub entries: Vec<FeedEntryResponse>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// A comment in a post's thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A single post with its full comment thread, oldest comment first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Public category header returned alongside a category feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// Category feed: header plus entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedResponse {
    pub category: CategoryResponse,
    #[serde(flatten)]
    pub feed: FeedResponse,
}

/// Public profile fields returned alongside an author feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Author feed: profile plus entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub profile: ProfileResponse,
    #[serde(flatten)]
    pub feed: FeedResponse,
}
