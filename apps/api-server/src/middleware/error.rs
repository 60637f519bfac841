//! Error handling - engine outcomes mapped to HTTP responses.
//!
//! `NotFound` and `InvalidInput` become RFC 7807 problem documents.
//! `Denied` is not an error page at all: the requester is routed back to
//! the parent post's read view with `303 See Other`, the REST analogue of
//! the ownership-denial redirect.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use gazette_shared::ErrorResponse;
use std::fmt;
use uuid::Uuid;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Denied { post_id: Uuid },
    Internal(String),
}

/// Convenience result alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Denied { post_id } => write!(f, "Denied; see post {}", post_id),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Denied { .. } => StatusCode::SEE_OTHER,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(detail) => {
                HttpResponse::NotFound().json(ErrorResponse::not_found(detail.clone()))
            }
            AppError::BadRequest(detail) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail.clone()))
            }
            AppError::Denied { post_id } => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, format!("/api/posts/{post_id}")))
                .finish(),
            AppError::Internal(detail) => {
                // Log internal errors, hide the detail from the client
                tracing::error!("Internal error: {}", detail);
                HttpResponse::InternalServerError().json(ErrorResponse::internal_error())
            }
        }
    }
}

// Conversion from engine errors
impl From<gazette_core::EngineError> for AppError {
    fn from(err: gazette_core::EngineError) -> Self {
        match err {
            gazette_core::EngineError::NotFound { entity } => {
                AppError::NotFound(format!("{entity} not found"))
            }
            gazette_core::EngineError::InvalidInput(msg) => AppError::BadRequest(msg),
            gazette_core::EngineError::Denied { post_id } => AppError::Denied { post_id },
            gazette_core::EngineError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}
