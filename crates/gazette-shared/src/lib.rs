//! # Gazette Shared
//!
//! Request/response types shared between the server and any client.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
