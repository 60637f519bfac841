//! Post detail and post mutation handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use gazette_core::engine::PostInput;
use gazette_shared::ApiResponse;
use gazette_shared::dto::{PostDetailResponse, PostPayload};

use crate::middleware::auth::{MaybeRequester, Requester};
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{comment_response, post_response};

fn post_input(payload: PostPayload) -> PostInput {
    PostInput {
        title: payload.title,
        body: payload.body,
        pub_date: payload.pub_date,
        is_published: payload.is_published,
        category_id: payload.category_id,
        location_id: payload.location_id,
    }
}

/// GET /api/posts/{post_id}
///
/// A post with its comment thread, oldest comment first. Invisible posts
/// are indistinguishable from missing ones.
pub async fn post_detail(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    identity: MaybeRequester,
) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let detail = state
        .engine
        .post_detail(*post_id, identity.viewer(), now)
        .await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(detail.post),
        comments: detail.comments.into_iter().map(comment_response).collect(),
    }))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    requester: Requester,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .engine
        .create_post(requester.user_id, post_input(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// PUT /api/posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    requester: Requester,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .engine
        .update_post(*post_id, requester.user_id, post_input(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    requester: Requester,
) -> AppResult<HttpResponse> {
    state.engine.delete_post(*post_id, requester.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
