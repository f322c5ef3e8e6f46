use thiserror::Error;

pub mod audit;
pub mod database;
pub mod movie;
pub mod token;
pub mod user;

pub use audit::AuditError;
pub use database::DatabaseError;
pub use movie::MovieError;
pub use token::TokenError;
pub use user::UserError;

/// Internal error type for store and service operations
///
/// Hybrid design separates infrastructure errors (shared) from domain
/// errors (per subsystem). Not exposed via API - endpoints must convert to
/// the `errors::api` response enums.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Movie(#[from] MovieError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
