//! Ownership guard for the mutation path.
//!
//! Visibility denial hides existence (`NotFound`); ownership denial reveals
//! it but declines the action (`Denied`), carrying the parent post id so
//! the transport can route the requester back to the post detail view.

use uuid::Uuid;

use crate::error::EngineError;

/// Authorize a mutation: the requester must be the author of record.
///
/// `parent_post_id` is the canonical read view to redirect to on denial -
/// for a post that is the post itself, for a comment its parent post.
pub fn require_owner(
    author_id: Uuid,
    requester_id: Uuid,
    parent_post_id: Uuid,
) -> Result<(), EngineError> {
    if author_id == requester_id {
        Ok(())
    } else {
        Err(EngineError::Denied {
            post_id: parent_post_id,
        })
    }
}
