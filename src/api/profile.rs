use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::errors::AuthError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::dto::profile::{ProfileResponse, UpdateProfileRequest};

/// Profile API endpoints for the signed-in user
pub struct ProfileApi {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl ProfileApi {
    /// Create a new ProfileApi
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    fn caller_id(&self, auth: &BearerAuth) -> Result<i32, AuthError> {
        let claims = helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|e| AuthError::from_internal(e.into()))?;
        helpers::subject_id(&claims).map_err(|e| AuthError::from_internal(e.into()))
    }
}

/// API tags for profile endpoints
#[derive(Tags)]
enum ProfileTags {
    /// Own profile
    Profile,
}

#[OpenApi(prefix_path = "/profile")]
impl ProfileApi {
    /// Fetch the caller's profile
    #[oai(path = "/", method = "get", tag = "ProfileTags::Profile")]
    async fn get(&self, auth: BearerAuth) -> Result<Json<ProfileResponse>, AuthError> {
        let user_id = self.caller_id(&auth)?;

        let user = self
            .user_store
            .get_by_id(user_id)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(ProfileResponse::from(user)))
    }

    /// Update the caller's profile names
    #[oai(path = "/", method = "put", tag = "ProfileTags::Profile")]
    async fn update(
        &self,
        auth: BearerAuth,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<ProfileResponse>, AuthError> {
        let user_id = self.caller_id(&auth)?;
        let body = body.0;

        let updated = self
            .user_store
            .update_profile(user_id, body.first_name, body.last_name)
            .await
            .map_err(AuthError::from_internal)?;

        Ok(Json(ProfileResponse::from(updated)))
    }
}
