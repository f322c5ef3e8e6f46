use thiserror::Error;

/// JWT issue/validation errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Failed to create token: {0}")]
    Creation(String),
}
