use std::sync::Arc;

use crate::errors::GuardError;
use crate::stores::{RoleStore, UserStore};
use crate::types::internal::auth::Actor;
use crate::types::internal::roles::RoleName;

/// Privilege a guarded operation demands of its confirming actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// SuperAdmin only: role changes and user deletion
    SuperAdmin,
    /// Admin or SuperAdmin: catalog deletion
    CatalogAdmin,
}

impl Requirement {
    fn satisfied_by(&self, roles: &[String]) -> bool {
        let has = |role: RoleName| roles.iter().any(|r| r == role.as_str());
        match self {
            Requirement::SuperAdmin => has(RoleName::SuperAdmin),
            Requirement::CatalogAdmin => has(RoleName::Admin) || has(RoleName::SuperAdmin),
        }
    }
}

/// Re-authenticates a privileged actor immediately before a destructive
/// operation
///
/// The check is independent of the ambient session: the caller supplies
/// email and password explicitly, and nothing here is cached, so a
/// hijacked bearer token alone cannot drive a guarded mutation.
pub struct PrivilegedGuard {
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
}

impl PrivilegedGuard {
    /// Create a new PrivilegedGuard over the identity stores
    pub fn new(user_store: Arc<UserStore>, role_store: Arc<RoleStore>) -> Self {
        Self {
            user_store,
            role_store,
        }
    }

    /// Resolve and verify the confirming actor
    ///
    /// Checks run in a fixed order: account lookup, privilege, password.
    ///
    /// # Errors
    /// * `GuardError::ActorNotFound` - no account for the email
    /// * `GuardError::InsufficientPrivilege` - account lacks the required
    ///   role
    /// * `GuardError::InvalidCredential` - password did not verify
    pub async fn reauthenticate(
        &self,
        email: &str,
        password: &str,
        required: Requirement,
    ) -> Result<Actor, GuardError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| GuardError::ActorNotFound(email.to_string()))?;

        let roles = self.role_store.roles_for_user(user.id).await?;
        if !required.satisfied_by(&roles) {
            tracing::warn!(
                "Guard rejected {}: missing privilege for {:?}",
                user.email,
                required
            );
            return Err(GuardError::InsufficientPrivilege { email: user.email });
        }

        if !self.user_store.verify_password(&user, password).await? {
            tracing::warn!("Guard rejected {}: password mismatch", user.email);
            return Err(GuardError::InvalidCredential);
        }

        Ok(Actor {
            id: user.id,
            email: user.email,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{create_user_with_roles, setup_test_stores};

    #[tokio::test]
    async fn superadmin_passes_superadmin_requirement() {
        let stores = setup_test_stores().await;
        create_user_with_roles(&stores, "root@movievault.test", "Passw0rd!", &["SuperAdmin"])
            .await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        let actor = guard
            .reauthenticate("root@movievault.test", "Passw0rd!", Requirement::SuperAdmin)
            .await
            .expect("reauthentication should succeed");

        assert_eq!(actor.email, "root@movievault.test");
        assert!(actor.roles.iter().any(|r| r == "SuperAdmin"));
    }

    #[tokio::test]
    async fn admin_fails_superadmin_requirement_but_passes_catalog() {
        let stores = setup_test_stores().await;
        create_user_with_roles(&stores, "admin@movievault.test", "Passw0rd!", &["Admin"]).await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        let rejected = guard
            .reauthenticate("admin@movievault.test", "Passw0rd!", Requirement::SuperAdmin)
            .await;
        assert!(matches!(
            rejected,
            Err(GuardError::InsufficientPrivilege { .. })
        ));

        let actor = guard
            .reauthenticate(
                "admin@movievault.test",
                "Passw0rd!",
                Requirement::CatalogAdmin,
            )
            .await
            .expect("catalog requirement should accept Admin");
        assert_eq!(actor.roles, vec!["Admin".to_string()]);
    }

    #[tokio::test]
    async fn viewer_fails_both_requirements() {
        let stores = setup_test_stores().await;
        create_user_with_roles(&stores, "viewer@movievault.test", "Passw0rd!", &["Viewer"]).await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        for required in [Requirement::SuperAdmin, Requirement::CatalogAdmin] {
            let rejected = guard
                .reauthenticate("viewer@movievault.test", "Passw0rd!", required)
                .await;
            assert!(matches!(
                rejected,
                Err(GuardError::InsufficientPrivilege { .. })
            ));
        }
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credential() {
        let stores = setup_test_stores().await;
        create_user_with_roles(&stores, "root@movievault.test", "Passw0rd!", &["SuperAdmin"])
            .await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        let rejected = guard
            .reauthenticate("root@movievault.test", "wrong", Requirement::SuperAdmin)
            .await;

        assert!(matches!(rejected, Err(GuardError::InvalidCredential)));
    }

    #[tokio::test]
    async fn unknown_email_is_actor_not_found() {
        let stores = setup_test_stores().await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        let rejected = guard
            .reauthenticate("nobody@movievault.test", "irrelevant", Requirement::SuperAdmin)
            .await;

        assert!(matches!(rejected, Err(GuardError::ActorNotFound(_))));
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let stores = setup_test_stores().await;
        create_user_with_roles(&stores, "Root@MovieVault.test", "Passw0rd!", &["SuperAdmin"])
            .await;
        let guard = PrivilegedGuard::new(stores.user_store.clone(), stores.role_store.clone());

        let actor = guard
            .reauthenticate("root@movievault.test", "Passw0rd!", Requirement::SuperAdmin)
            .await
            .expect("lookup should ignore case");

        assert_eq!(actor.email, "Root@MovieVault.test");
    }
}
