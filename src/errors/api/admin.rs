use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::guard::GuardError;
use crate::errors::internal::{InternalError, UserError};

/// Standardized error response for user-management and audit endpoints
#[derive(Object, Debug)]
pub struct AdminErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// User-management operation error types
#[derive(ApiResponse, Debug)]
pub enum AdminError {
    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<AdminErrorResponse>),

    /// Target user not found
    #[oai(status = 404)]
    UserNotFound(Json<AdminErrorResponse>),

    /// SuperAdmin role required
    #[oai(status = 403)]
    SuperAdminRequired(Json<AdminErrorResponse>),

    /// Confirmation email did not resolve to an account
    #[oai(status = 401)]
    InvalidConfirmationEmail(Json<AdminErrorResponse>),

    /// Confirmation password did not verify
    #[oai(status = 401)]
    InvalidConfirmationPassword(Json<AdminErrorResponse>),

    /// Deleting this user would remove the last SuperAdmin
    #[oai(status = 409)]
    LastSuperAdmin(Json<AdminErrorResponse>),

    /// A requested role name is outside the known vocabulary
    #[oai(status = 400)]
    UnknownRole(Json<AdminErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    EmailTaken(Json<AdminErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AdminErrorResponse>),
}

impl AdminError {
    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        AdminError::Unauthorized(Json(AdminErrorResponse {
            error: "unauthorized".to_string(),
            message: "Invalid or expired token".to_string(),
            status_code: 401,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found(user_id: i32) -> Self {
        AdminError::UserNotFound(Json(AdminErrorResponse {
            error: "user_not_found".to_string(),
            message: format!("User not found: {}", user_id),
            status_code: 404,
        }))
    }

    /// Create a SuperAdminRequired error
    pub fn super_admin_required() -> Self {
        AdminError::SuperAdminRequired(Json(AdminErrorResponse {
            error: "super_admin_required".to_string(),
            message: "SuperAdmin role required".to_string(),
            status_code: 403,
        }))
    }

    /// Create an InvalidConfirmationEmail error
    pub fn invalid_confirmation_email() -> Self {
        AdminError::InvalidConfirmationEmail(Json(AdminErrorResponse {
            error: "invalid_confirmation_email".to_string(),
            message: "Invalid SuperAdmin email".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidConfirmationPassword error
    pub fn invalid_confirmation_password() -> Self {
        AdminError::InvalidConfirmationPassword(Json(AdminErrorResponse {
            error: "invalid_confirmation_password".to_string(),
            message: "Invalid SuperAdmin password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a LastSuperAdmin error
    pub fn last_super_admin(user_id: i32) -> Self {
        AdminError::LastSuperAdmin(Json(AdminErrorResponse {
            error: "last_super_admin".to_string(),
            message: format!("Cannot delete user {}: at least one SuperAdmin must remain", user_id),
            status_code: 409,
        }))
    }

    /// Create an UnknownRole error
    pub fn unknown_role(name: &str) -> Self {
        AdminError::UnknownRole(Json(AdminErrorResponse {
            error: "unknown_role".to_string(),
            message: format!("Unknown role: {}", name),
            status_code: 400,
        }))
    }

    /// Create an EmailTaken error
    pub fn email_taken(email: &str) -> Self {
        AdminError::EmailTaken(Json(AdminErrorResponse {
            error: "email_taken".to_string(),
            message: format!("Email already registered: {}", email),
            status_code: 400,
        }))
    }

    /// Convert an InternalError to an AdminError
    ///
    /// Explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::User(UserError::NotFound(id)) => Self::user_not_found(*id),
            InternalError::User(UserError::LastSuperAdmin(id)) => Self::last_super_admin(*id),
            InternalError::User(UserError::EmailTaken(email)) => Self::email_taken(email),
            _ => {
                tracing::error!("Internal error in admin operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Convert a GuardError to an AdminError
    pub fn from_guard(err: GuardError) -> Self {
        match err {
            GuardError::ActorNotFound(_) => Self::invalid_confirmation_email(),
            // The guard rejects non-SuperAdmin confirmers before checking
            // the password, mirroring the email failure to the client.
            GuardError::InsufficientPrivilege { .. } => Self::invalid_confirmation_email(),
            GuardError::InvalidCredential => Self::invalid_confirmation_password(),
            GuardError::Internal(err) => Self::from_internal(err),
        }
    }

    /// Create a generic internal server error without exposing details
    pub fn internal_server_error() -> Self {
        AdminError::InternalError(Json(AdminErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthorized(json) => json.0.message.clone(),
            AdminError::UserNotFound(json) => json.0.message.clone(),
            AdminError::SuperAdminRequired(json) => json.0.message.clone(),
            AdminError::InvalidConfirmationEmail(json) => json.0.message.clone(),
            AdminError::InvalidConfirmationPassword(json) => json.0.message.clone(),
            AdminError::LastSuperAdmin(json) => json.0.message.clone(),
            AdminError::UnknownRole(json) => json.0.message.clone(),
            AdminError::EmailTaken(json) => json.0.message.clone(),
            AdminError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
