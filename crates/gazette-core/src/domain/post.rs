use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a publication authored by a user.
///
/// `pub_date` may lie in the future (scheduled publication); `is_published`
/// is the author-controlled visibility flag. The author is immutable after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
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

impl Post {
    /// Create a new post.
    pub fn new(
        author_id: Uuid,
        title: String,
        body: String,
        pub_date: DateTime<Utc>,
        category_id: Option<Uuid>,
        location_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            body,
            pub_date,
            is_published: true,
            category_id,
            location_id,
            created_at: Utc::now(),
        }
    }
}
