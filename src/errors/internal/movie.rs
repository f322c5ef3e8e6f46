use thiserror::Error;

/// Domain errors for catalog operations
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),
}
