use std::sync::Arc;

use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::api::helpers;
use crate::errors::AuthError;
use crate::services::{IdentityService, TokenService};
use crate::stores::NewUser;
use crate::types::dto::auth::{LoginRequest, RegisterRequest, TokenResponse, WhoAmIResponse};
use crate::types::dto::common::MessageResponse;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Authentication API endpoints
pub struct AuthApi {
    identity_service: Arc<IdentityService>,
    token_service: Arc<TokenService>,
}

impl AuthApi {
    /// Create a new AuthApi
    pub fn new(identity_service: Arc<IdentityService>, token_service: Arc<TokenService>) -> Self {
        Self {
            identity_service,
            token_service,
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let outcome = self
            .identity_service
            .login(&body.email, &body.password)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(TokenResponse {
            access_token: outcome.access_token,
            token_type: "Bearer".to_string(),
            expires_in: 3600, // 60 minutes in seconds
        }))
    }

    /// Register a viewer account and log it in
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<TokenResponse>, AuthError> {
        let body = body.0;
        let outcome = self
            .identity_service
            .register(NewUser {
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                password: body.password,
            })
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(TokenResponse {
            access_token: outcome.access_token,
            token_type: "Bearer".to_string(),
            expires_in: 3600, // 60 minutes in seconds
        }))
    }

    /// Verify the bearer token and return the caller's identity
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let claims = helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|e| AuthError::from_internal(e.into()))?;
        let user_id =
            helpers::subject_id(&claims).map_err(|e| AuthError::from_internal(e.into()))?;

        Ok(Json(WhoAmIResponse {
            user_id,
            email: claims.email,
            roles: claims.roles,
            expires_at: claims.exp,
        }))
    }

    /// Record a logout in the audit trail
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, auth: BearerAuth) -> Result<Json<MessageResponse>, AuthError> {
        let claims = helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|e| AuthError::from_internal(e.into()))?;
        let user_id =
            helpers::subject_id(&claims).map_err(|e| AuthError::from_internal(e.into()))?;

        self.identity_service
            .logout(user_id, &claims.email)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }
}
