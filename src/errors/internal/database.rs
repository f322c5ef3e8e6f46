use thiserror::Error;

/// Infrastructure-level database failures, tagged with the store operation
/// that hit them
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error in {operation}: {source}")]
    Operation {
        operation: String,
        source: sea_orm::DbErr,
    },
}
