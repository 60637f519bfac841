//! HTTP handlers and route configuration.

mod comments;
mod feeds;
mod health;
mod posts;
mod profile;

use actix_web::web;
use serde::Deserialize;

use gazette_core::domain::{Comment, Post};
use gazette_core::engine::{FeedEntry, Page};
use gazette_shared::dto::{CommentResponse, FeedEntryResponse, FeedResponse, PostResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Listing surfaces
            .route("/posts", web::get().to(feeds::global_feed))
            .route("/categories/{slug}/posts", web::get().to(feeds::category_feed))
            .route("/profiles/{username}", web::get().to(feeds::author_feed))
            .route("/posts/{post_id}", web::get().to(posts::post_detail))
            // Mutations
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{post_id}", web::put().to(posts::update_post))
            .route("/posts/{post_id}", web::delete().to(posts::delete_post))
            .route(
                "/posts/{post_id}/comments",
                web::post().to(comments::add_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::put().to(comments::update_comment),
            )
            .route(
                "/posts/{post_id}/comments/{comment_id}",
                web::delete().to(comments::delete_comment),
            )
            .route("/profile", web::put().to(profile::update_profile)),
    );
}

/// Page selector, parsed leniently: anything that is not a positive
/// integer falls back to the paginator's default.
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub(crate) fn number(&self) -> Option<usize> {
        self.page.as_deref().and_then(|s| s.parse().ok())
    }
}

pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        body: post.body,
        pub_date: post.pub_date,
        is_published: post.is_published,
        category_id: post.category_id,
        location_id: post.location_id,
        created_at: post.created_at,
    }
}

pub(crate) fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub(crate) fn feed_response(page: Page<FeedEntry>) -> FeedResponse {
    FeedResponse {
        entries: page
            .items
            .into_iter()
            .map(|entry| FeedEntryResponse {
                post: post_response(entry.post),
                comment_count: entry.comment_count,
            })
            .collect(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        has_next: page.has_next,
        has_previous: page.has_previous,
    }
}
