//! Comment mutation handlers.
//!
//! Comments are always addressed through their parent post; a comment id
//! under the wrong post is a 404, not a hint.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::engine::CommentInput;
use gazette_shared::ApiResponse;
use gazette_shared::dto::CommentPayload;

use crate::middleware::auth::Requester;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::comment_response;

/// POST /api/posts/{post_id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
    requester: Requester,
    body: web::Json<CommentPayload>,
) -> AppResult<HttpResponse> {
    let comment = state
        .engine
        .add_comment(
            *post_id,
            requester.user_id,
            CommentInput {
                text: body.into_inner().text,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment_response(comment))))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    requester: Requester,
    body: web::Json<CommentPayload>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .engine
        .update_comment(
            post_id,
            comment_id,
            requester.user_id,
            CommentInput {
                text: body.into_inner().text,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(comment_response(comment))))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    requester: Requester,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .engine
        .delete_comment(post_id, comment_id, requester.user_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
