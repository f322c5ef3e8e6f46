use thiserror::Error;

/// Domain errors for user identity and management operations
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Deleting this user would leave the system without a SuperAdmin
    #[error("User {0} is the last SuperAdmin and cannot be deleted")]
    LastSuperAdmin(i32),

    #[error("Invalid email or password")]
    InvalidCredential,
}
