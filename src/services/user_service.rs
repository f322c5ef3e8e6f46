use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::services::audit_recorder::AuditRecorder;
use crate::services::role_reconciler::{ReconcileOutcome, RoleReconciler};
use crate::stores::{NewUser, RoleStore, UserStore};
use crate::types::db::user;
use crate::types::internal::audit::{AuditAction, EntityKind};
use crate::types::internal::auth::Actor;
use crate::types::internal::roles::RoleName;

/// One row of the user-management overview
#[derive(Debug, Clone)]
pub struct UserOverview {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// State snapshot written to the audit trail when a user is deleted.
/// Deliberately excludes the credential hash.
#[derive(Debug, Clone, Serialize)]
struct UserSnapshot {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
    roles: Vec<String>,
}

/// User-management workflows: listing, admin-initiated registration, role
/// changes and deletion
///
/// Every caller passing an `Actor` has already been re-authenticated by
/// the privileged guard; this service applies the mutation and writes the
/// audit entry. The last-SuperAdmin invariant lives here, at deletion
/// time, not in the reconciler.
pub struct UserService {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    role_reconciler: Arc<RoleReconciler>,
    audit_recorder: Arc<AuditRecorder>,
}

impl UserService {
    /// Create a new UserService
    pub fn new(
        user_store: Arc<UserStore>,
        role_store: Arc<RoleStore>,
        role_reconciler: Arc<RoleReconciler>,
        audit_recorder: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            user_store,
            role_store,
            role_reconciler,
            audit_recorder,
        }
    }

    /// List all users with their role sets for the management overview
    pub async fn list_users(&self) -> Result<Vec<UserOverview>, InternalError> {
        let users = self.user_store.all().await?;

        let mut overviews = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.role_store.roles_for_user(user.id).await?;
            overviews.push(UserOverview {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                roles,
                created_at: user.created_at,
                last_login_at: user.last_login_at,
            });
        }

        tracing::info!("Retrieved {} users", overviews.len());
        Ok(overviews)
    }

    /// Fetch a user and its current roles for the role-edit form
    pub async fn user_roles(
        &self,
        user_id: i32,
    ) -> Result<(user::Model, Vec<String>), InternalError> {
        let user = self.user_store.get_by_id(user_id).await?;
        let roles = self.role_store.roles_for_user(user_id).await?;
        Ok((user, roles))
    }

    /// Create a user with an admin-chosen role set
    pub async fn register_user(
        &self,
        actor: &Actor,
        new_user: NewUser,
        roles: &BTreeSet<String>,
    ) -> Result<user::Model, InternalError> {
        let created = self.user_store.create(new_user).await?;
        self.role_reconciler.reconcile(created.id, roles).await?;

        let granted: Vec<&String> = roles.iter().collect();
        self.audit_recorder
            .entry(AuditAction::RegisterUser, EntityKind::User)
            .actor(actor.id)
            .entity_id(created.id)
            .details(format!(
                "Registered user with roles: {}",
                join_roles(roles)
            ))
            .current_state(&granted)?
            .write()
            .await?;

        tracing::info!(
            "User {} registered by {} with roles {:?}",
            created.email,
            actor.email,
            roles
        );
        Ok(created)
    }

    /// Reconcile the target user's roles to the requested set and record
    /// the transition
    ///
    /// No audit entry is written when the reconciliation fails; the user
    /// keeps its pre-call role set in that case.
    pub async fn update_roles(
        &self,
        actor: &Actor,
        user_id: i32,
        requested: &BTreeSet<String>,
    ) -> Result<ReconcileOutcome, InternalError> {
        let previous = self.role_store.roles_for_user(user_id).await?;
        let outcome = self.role_reconciler.reconcile(user_id, requested).await?;
        let current: Vec<&String> = requested.iter().collect();

        self.audit_recorder
            .entry(AuditAction::UpdateUserRole, EntityKind::User)
            .actor(actor.id)
            .entity_id(user_id)
            .details(format!(
                "Updated roles from {} to {}",
                previous.join(", "),
                join_roles(requested)
            ))
            .previous_state(&previous)?
            .current_state(&current)?
            .write()
            .await?;

        tracing::info!("Role update successful for user {}", user_id);
        Ok(outcome)
    }

    /// Delete a user, refusing to remove the last SuperAdmin
    ///
    /// The deleted row (without its credential) and role set are kept as
    /// the previous-state snapshot; memberships cascade with the row.
    pub async fn delete_user(&self, actor: &Actor, user_id: i32) -> Result<(), InternalError> {
        let user = self.user_store.get_by_id(user_id).await?;
        let roles = self.role_store.roles_for_user(user_id).await?;

        if roles.iter().any(|r| r == RoleName::SuperAdmin.as_str()) {
            let super_admins = self
                .role_store
                .count_in_role(RoleName::SuperAdmin.as_str())
                .await?;
            if super_admins <= 1 {
                tracing::warn!("Cannot delete user {} - last SuperAdmin", user_id);
                return Err(UserError::LastSuperAdmin(user_id).into());
            }
        }

        let snapshot = UserSnapshot {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles,
        };

        self.user_store.delete(user_id).await?;

        self.audit_recorder
            .entry(AuditAction::DeleteUser, EntityKind::User)
            .actor(actor.id)
            .entity_id(user_id)
            .details(format!("Deleted user: {}", user.email))
            .previous_state(&snapshot)?
            .write()
            .await?;

        tracing::info!("User {} deleted by {}", user_id, actor.email);
        Ok(())
    }
}

fn join_roles(roles: &BTreeSet<String>) -> String {
    roles.iter().cloned().collect::<Vec<_>>().join(", ")
}
