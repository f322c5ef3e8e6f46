use std::sync::Arc;

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::services::audit_recorder::AuditRecorder;
use crate::services::token_service::TokenService;
use crate::stores::{NewUser, RoleStore, UserStore};
use crate::types::db::user;
use crate::types::internal::audit::{AuditAction, EntityKind};
use crate::types::internal::roles::RoleName;

/// Result of a successful login or registration
pub struct LoginOutcome {
    pub user: user::Model,
    pub roles: Vec<String>,
    pub access_token: String,
}

/// Authentication workflows: login, self-service registration, logout
///
/// Coordinates the user and role stores, the token service and the audit
/// recorder so every successful flow leaves its audit entry.
pub struct IdentityService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    token_service: Arc<TokenService>,
    audit_recorder: Arc<AuditRecorder>,
}

impl IdentityService {
    /// Create a new IdentityService
    pub fn new(
        user_store: Arc<UserStore>,
        role_store: Arc<RoleStore>,
        token_service: Arc<TokenService>,
        audit_recorder: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            user_store,
            role_store,
            token_service,
            audit_recorder,
        }
    }

    /// Verify credentials, stamp the login time and issue a token
    ///
    /// A failed verification returns `UserError::InvalidCredential` and
    /// leaves no trace: no mutation, no audit entry. Whether the email or
    /// the password was wrong is not distinguished.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, InternalError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredential)?;

        if !self.user_store.verify_password(&user, password).await? {
            tracing::warn!("Invalid login attempt for email: {}", email);
            return Err(UserError::InvalidCredential.into());
        }

        self.user_store.touch_last_login(user.id).await?;

        let roles = self.role_store.roles_for_user(user.id).await?;
        let access_token = self.token_service.issue(&user, &roles)?;

        self.audit_recorder
            .entry(AuditAction::Login, EntityKind::User)
            .actor(user.id)
            .entity_id(user.id)
            .details(format!("User {} logged in", user.email))
            .write()
            .await?;

        tracing::info!("User {} logged in successfully", user.email);

        Ok(LoginOutcome {
            user,
            roles,
            access_token,
        })
    }

    /// Register a self-service account with the Viewer role and log it in
    pub async fn register(&self, new_user: NewUser) -> Result<LoginOutcome, InternalError> {
        let user = self.user_store.create(new_user).await?;
        self.role_store
            .add_to_role(user.id, RoleName::Viewer.as_str())
            .await?;

        self.audit_recorder
            .entry(AuditAction::Register, EntityKind::User)
            .actor(user.id)
            .entity_id(user.id)
            .details(format!("User {} registered", user.email))
            .write()
            .await?;

        tracing::info!("User {} registered successfully", user.email);

        let roles = self.role_store.roles_for_user(user.id).await?;
        let access_token = self.token_service.issue(&user, &roles)?;

        Ok(LoginOutcome {
            user,
            roles,
            access_token,
        })
    }

    /// Record a logout for the audit trail
    ///
    /// Access tokens are stateless, so this writes the trail entry and
    /// nothing else.
    pub async fn logout(&self, user_id: i32, email: &str) -> Result<(), InternalError> {
        self.audit_recorder
            .entry(AuditAction::Logout, EntityKind::User)
            .actor(user_id)
            .entity_id(user_id)
            .details(format!("User {} logged out", email))
            .write()
            .await?;

        tracing::info!("User {} logged out", email);
        Ok(())
    }
}
