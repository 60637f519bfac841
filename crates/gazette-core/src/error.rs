//! Engine and store error taxonomy.
//!
//! `NotFound` covers both "does not exist" and "exists but is not visible
//! to this viewer" - existence is intentionally not distinguishable.
//! `Denied` is the mutation-path shape: the resource exists, the requester
//! does not own it, and the caller is expected to route back to the parent
//! post rather than surface a hard failure.

use thiserror::Error;
use uuid::Uuid;

/// Engine errors - expected, recoverable outcomes of the content engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("not the owner; redirect to post {post_id}")]
    Denied { post_id: Uuid },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

/// Store-level errors, propagated unmodified from implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("row not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),
}
