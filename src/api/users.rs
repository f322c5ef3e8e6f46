use std::collections::BTreeSet;
use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::helpers;
use crate::errors::AdminError;
use crate::services::privileged_guard::Requirement;
use crate::services::{PrivilegedGuard, TokenService, UserService};
use crate::stores::NewUser;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::users::{
    DeleteUserRequest, RegisterUserRequest, RoleUpdateResponse, UpdateRolesRequest,
    UserOverviewResponse, UserRolesResponse,
};
use crate::types::internal::auth::{Actor, Claims};
use crate::types::internal::roles::RoleName;

/// User management API endpoints, SuperAdmin only
///
/// Role updates and deletions carry confirmation credentials in the body;
/// the privileged guard re-verifies them on every call regardless of the
/// session token.
pub struct UsersApi {
    user_service: Arc<UserService>,
    guard: Arc<PrivilegedGuard>,
    token_service: Arc<TokenService>,
}

impl UsersApi {
    /// Create a new UsersApi
    pub fn new(
        user_service: Arc<UserService>,
        guard: Arc<PrivilegedGuard>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_service,
            guard,
            token_service,
        }
    }

    fn require_super_admin(&self, auth: &BearerAuth) -> Result<Claims, AdminError> {
        let claims = helpers::claims_from_token(&self.token_service, &auth.0.token)
            .map_err(|_| AdminError::unauthorized())?;
        if !claims.has_role(RoleName::SuperAdmin) {
            return Err(AdminError::super_admin_required());
        }
        Ok(claims)
    }
}

/// Validate requested role names against the known vocabulary
fn validated_role_set(roles: &[String]) -> Result<BTreeSet<String>, AdminError> {
    let mut set = BTreeSet::new();
    for name in roles {
        let role = RoleName::parse(name).ok_or_else(|| AdminError::unknown_role(name))?;
        set.insert(role.as_str().to_string());
    }
    Ok(set)
}

/// API tags for user management endpoints
#[derive(Tags)]
enum UserTags {
    /// User and role management
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// List all users with their role sets
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<UserOverviewResponse>>, AdminError> {
        self.require_super_admin(&auth)?;

        let users = self
            .user_service
            .list_users()
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(users.into_iter().map(UserOverviewResponse::from).collect()))
    }

    /// Register a user with an admin-chosen role set
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn register_user(
        &self,
        auth: BearerAuth,
        body: Json<RegisterUserRequest>,
    ) -> Result<Json<UserOverviewResponse>, AdminError> {
        let claims = self.require_super_admin(&auth)?;
        let actor_id = helpers::subject_id(&claims).map_err(|_| AdminError::unauthorized())?;
        let actor = Actor {
            id: actor_id,
            email: claims.email,
            roles: claims.roles,
        };

        let body = body.0;
        let roles = validated_role_set(&body.roles)?;

        let created = self
            .user_service
            .register_user(
                &actor,
                NewUser {
                    email: body.email,
                    first_name: body.first_name,
                    last_name: body.last_name,
                    password: body.password,
                },
                &roles,
            )
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(UserOverviewResponse {
            id: created.id,
            email: created.email,
            first_name: created.first_name,
            last_name: created.last_name,
            roles: roles.into_iter().collect(),
            created_at: created.created_at,
            last_login_at: created.last_login_at,
        }))
    }

    /// Current and available roles for the role-edit form
    #[oai(path = "/:id/roles", method = "get", tag = "UserTags::Users")]
    async fn roles(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<UserRolesResponse>, AdminError> {
        self.require_super_admin(&auth)?;

        let (user, current_roles) = self
            .user_service
            .user_roles(id.0)
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(UserRolesResponse {
            user_id: user.id,
            email: user.email,
            current_roles,
            available_roles: RoleName::ALL.iter().map(|r| r.as_str().to_string()).collect(),
        }))
    }

    /// Reconcile a user's roles to the requested set
    ///
    /// Requires SuperAdmin confirmation credentials in the body; the
    /// session token alone never authorizes this.
    #[oai(path = "/:id/roles", method = "post", tag = "UserTags::Users")]
    async fn update_roles(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<UpdateRolesRequest>,
    ) -> Result<Json<RoleUpdateResponse>, AdminError> {
        self.require_super_admin(&auth)?;

        let body = body.0;
        let roles = validated_role_set(&body.roles)?;

        let actor = self
            .guard
            .reauthenticate(
                &body.super_admin_email,
                &body.super_admin_password,
                Requirement::SuperAdmin,
            )
            .await
            .map_err(AdminError::from_guard)?;

        let outcome = self
            .user_service
            .update_roles(&actor, id.0, &roles)
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(RoleUpdateResponse {
            user_id: id.0,
            granted: outcome.granted,
            revoked: outcome.revoked,
        }))
    }

    /// Delete a user with SuperAdmin confirmation credentials
    #[oai(path = "/:id/delete", method = "post", tag = "UserTags::Users")]
    async fn delete_user(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<DeleteUserRequest>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.require_super_admin(&auth)?;

        let actor = self
            .guard
            .reauthenticate(
                &body.super_admin_email,
                &body.super_admin_password,
                Requirement::SuperAdmin,
            )
            .await
            .map_err(AdminError::from_guard)?;

        self.user_service
            .delete_user(&actor, id.0)
            .await
            .map_err(AdminError::from_internal)?;

        Ok(Json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }))
    }
}
