use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

use crate::errors::guard::GuardError;
use crate::errors::internal::{InternalError, MovieError};

/// Standardized error response for catalog endpoints
#[derive(Object, Debug)]
pub struct CatalogErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Movie catalog error types
#[derive(ApiResponse, Debug)]
pub enum CatalogError {
    /// Missing, invalid or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<CatalogErrorResponse>),

    /// Movie not found
    #[oai(status = 404)]
    MovieNotFound(Json<CatalogErrorResponse>),

    /// Admin or SuperAdmin role required
    #[oai(status = 403)]
    AdminRequired(Json<CatalogErrorResponse>),

    /// Deletion confirmation credentials rejected
    #[oai(status = 401)]
    InvalidConfirmation(Json<CatalogErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<CatalogErrorResponse>),
}

impl CatalogError {
    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        CatalogError::Unauthorized(Json(CatalogErrorResponse {
            error: "unauthorized".to_string(),
            message: "Invalid or expired token".to_string(),
            status_code: 401,
        }))
    }

    /// Create a MovieNotFound error
    pub fn movie_not_found(id: i32) -> Self {
        CatalogError::MovieNotFound(Json(CatalogErrorResponse {
            error: "movie_not_found".to_string(),
            message: format!("Movie not found: {}", id),
            status_code: 404,
        }))
    }

    /// Create an AdminRequired error
    pub fn admin_required() -> Self {
        CatalogError::AdminRequired(Json(CatalogErrorResponse {
            error: "admin_required".to_string(),
            message: "Only Admins or SuperAdmins can manage the catalog".to_string(),
            status_code: 403,
        }))
    }

    /// Create an InvalidConfirmation error
    pub fn invalid_confirmation() -> Self {
        CatalogError::InvalidConfirmation(Json(CatalogErrorResponse {
            error: "invalid_confirmation".to_string(),
            message: "Invalid confirmation credentials".to_string(),
            status_code: 401,
        }))
    }

    /// Convert an InternalError to a CatalogError
    pub fn from_internal(err: InternalError) -> Self {
        match &err {
            InternalError::Movie(MovieError::NotFound(id)) => Self::movie_not_found(*id),
            _ => {
                tracing::error!("Internal error in catalog operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Convert a GuardError to a CatalogError
    pub fn from_guard(err: GuardError) -> Self {
        match err {
            GuardError::ActorNotFound(_)
            | GuardError::InvalidCredential => Self::invalid_confirmation(),
            GuardError::InsufficientPrivilege { .. } => Self::admin_required(),
            GuardError::Internal(err) => Self::from_internal(err),
        }
    }

    /// Create a generic internal server error without exposing details
    pub fn internal_server_error() -> Self {
        CatalogError::InternalError(Json(CatalogErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            CatalogError::Unauthorized(json) => json.0.message.clone(),
            CatalogError::MovieNotFound(json) => json.0.message.clone(),
            CatalogError::AdminRequired(json) => json.0.message.clone(),
            CatalogError::InvalidConfirmation(json) => json.0.message.clone(),
            CatalogError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
