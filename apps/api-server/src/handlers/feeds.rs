//! Listing surface handlers: global feed, category feed, author feed.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use gazette_shared::dto::{
    CategoryFeedResponse, CategoryResponse, ProfileFeedResponse, ProfileResponse,
};

use crate::middleware::auth::MaybeRequester;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{PageQuery, feed_response};

/// GET /api/posts
///
/// The public home feed. Always the anonymous view, whoever asks.
pub async fn global_feed(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let page = state.engine.global_feed(now, query.number()).await?;

    Ok(HttpResponse::Ok().json(feed_response(page)))
}

/// GET /api/categories/{slug}/posts
pub async fn category_feed(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let feed = state
        .engine
        .category_feed(&slug, now, query.number())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: CategoryResponse {
            id: feed.category.id,
            title: feed.category.title,
            description: feed.category.description,
            slug: feed.category.slug,
        },
        feed: feed_response(feed.page),
    }))
}

/// GET /api/profiles/{username}
///
/// An author's profile with their posts. The owner sees drafts and
/// scheduled posts; everyone else only published content.
pub async fn author_feed(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: MaybeRequester,
) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let feed = state
        .engine
        .author_feed(&username, identity.viewer(), now, query.number())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: ProfileResponse {
            id: feed.profile.id,
            username: feed.profile.username,
            first_name: feed.profile.first_name,
            last_name: feed.profile.last_name,
        },
        feed: feed_response(feed.page),
    }))
}
