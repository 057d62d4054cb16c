//! API handlers for the Biblion catalog endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod home;
pub mod openapi;

use crate::error::AppError;

/// Fallback handler for unmatched paths
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}
