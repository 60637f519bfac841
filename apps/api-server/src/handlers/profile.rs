//! Profile editing - a user may only touch their own record.

use actix_web::{HttpResponse, web};

use gazette_core::engine::ProfileInput;
use gazette_shared::ApiResponse;
use gazette_shared::dto::{ProfilePayload, ProfileResponse};

use crate::middleware::auth::Requester;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// PUT /api/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    requester: Requester,
    body: web::Json<ProfilePayload>,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    let user = state
        .engine
        .update_profile(
            requester.user_id,
            ProfileInput {
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
    })))
}
