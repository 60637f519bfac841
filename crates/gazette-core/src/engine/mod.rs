//! The content visibility & access engine.
//!
//! Stateless and request-scoped: every operation takes the clock (`now`)
//! and the viewer/requester identity explicitly, reads the store, and
//! returns plain result variants. No state is retained between calls and
//! no entity data is cached across them.

mod feed;
mod guard;
mod mutation;
mod page;
mod visibility;

pub use feed::{CategoryFeed, FeedEntry, PostDetail, ProfileFeed};
pub use guard::require_owner;
pub use mutation::{CommentInput, PostInput, ProfileInput};
pub use page::{POSTS_PER_PAGE, Page, paginate};
pub use visibility::{Viewer, is_visible};

use crate::ports::Stores;

/// The engine facade. Cheap to clone; holds only store handles.
#[derive(Clone)]
pub struct Engine {
    stores: Stores,
}

impl Engine {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub(crate) fn stores(&self) -> &Stores {
        &self.stores
    }
}
