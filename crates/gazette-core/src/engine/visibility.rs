//! The visibility policy: one pure function deciding whether a single post
//! is visible to a viewer at a given instant.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

/// The identity evaluating visibility. Anonymous viewers only ever see
/// fully published content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User(Uuid),
}

impl Viewer {
    pub fn user_id(self) -> Option<Uuid> {
        match self {
            Viewer::Anonymous => None,
            Viewer::User(id) => Some(id),
        }
    }

    /// Whether this viewer is the given user.
    pub fn is(self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}

/// Decide whether `post` is visible to `viewer` at `now`.
///
/// `category` is the post's *live* category record, if the post has one;
/// passing a stale or wrong record is a caller bug. Authors always see
/// their own posts. Everyone else sees a post only when every gate passes:
/// the post is published, its category (if any) is published, and its
/// publication date is not in the future.
///
/// Pure function of its inputs; `now` is never read from the ambient clock
/// here.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: Viewer,
    now: DateTime<Utc>,
) -> bool {
    if viewer.is(post.author_id) {
        return true;
    }

    if !post.is_published {
        return false;
    }

    // Category gate, evaluated against the live record. A dangling
    // category_id fails closed.
    let category_ok = match (post.category_id, category) {
        (None, _) => true,
        (Some(id), Some(cat)) if cat.id == id => cat.is_published,
        (Some(_), _) => false,
    };
    if !category_ok {
        return false;
    }

    post.pub_date <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn post(author_id: Uuid, category_id: Option<Uuid>, published: bool, now: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            title: "t".to_owned(),
            body: "b".to_owned(),
            pub_date: now - TimeDelta::hours(1),
            is_published: published,
            category_id,
            location_id: None,
            created_at: now - TimeDelta::days(1),
        }
    }

    fn category(id: Uuid, published: bool) -> Category {
        Category {
            id,
            title: "news".to_owned(),
            description: String::new(),
            slug: "news".to_owned(),
            is_published: published,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn author_sees_own_draft_regardless_of_gates() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let cat_id = Uuid::new_v4();
        let mut p = post(author, Some(cat_id), false, now);
        p.pub_date = now + TimeDelta::days(7);
        let cat = category(cat_id, false);

        assert!(is_visible(&p, Some(&cat), Viewer::User(author), now));
    }

    #[test]
    fn anonymous_needs_all_gates() {
        let now = Utc::now();
        let p = post(Uuid::new_v4(), None, true, now);
        assert!(is_visible(&p, None, Viewer::Anonymous, now));
    }

    #[test]
    fn unpublished_post_hidden_from_others() {
        let now = Utc::now();
        let p = post(Uuid::new_v4(), None, false, now);
        assert!(!is_visible(&p, None, Viewer::Anonymous, now));
        assert!(!is_visible(&p, None, Viewer::User(Uuid::new_v4()), now));
    }

    #[test]
    fn future_pub_date_hidden_from_others() {
        let now = Utc::now();
        let mut p = post(Uuid::new_v4(), None, true, now);
        p.pub_date = now + TimeDelta::seconds(1);
        assert!(!is_visible(&p, None, Viewer::Anonymous, now));
        // Exactly at pub_date it flips visible.
        assert!(is_visible(&p, None, Viewer::Anonymous, p.pub_date));
    }

    #[test]
    fn unpublished_category_gates_post() {
        let now = Utc::now();
        let cat_id = Uuid::new_v4();
        let p = post(Uuid::new_v4(), Some(cat_id), true, now);
        let cat = category(cat_id, false);
        assert!(!is_visible(&p, Some(&cat), Viewer::Anonymous, now));

        let cat = category(cat_id, true);
        assert!(is_visible(&p, Some(&cat), Viewer::Anonymous, now));
    }

    #[test]
    fn missing_category_record_fails_closed() {
        let now = Utc::now();
        let p = post(Uuid::new_v4(), Some(Uuid::new_v4()), true, now);
        assert!(!is_visible(&p, None, Viewer::Anonymous, now));
    }

    #[test]
    fn uncategorized_post_has_no_category_gate() {
        let now = Utc::now();
        let p = post(Uuid::new_v4(), None, true, now);
        // A category record for some other post must not matter.
        let stray = category(Uuid::new_v4(), false);
        assert!(is_visible(&p, Some(&stray), Viewer::Anonymous, now));
    }
}
