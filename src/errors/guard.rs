use thiserror::Error;

use crate::errors::internal::InternalError;

/// Outcomes of the privileged-mutation guard
///
/// Each failure is a typed, expected result: callers render a message and
/// abort the guarded mutation without writing an audit entry.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("No account found for email: {0}")]
    ActorNotFound(String),

    #[error("Account {email} does not hold the privilege required for this operation")]
    InsufficientPrivilege { email: String },

    #[error("Invalid password")]
    InvalidCredential,

    #[error(transparent)]
    Internal(#[from] InternalError),
}
