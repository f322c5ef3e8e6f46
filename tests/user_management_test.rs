mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::{count_audit_rows, create_user_with_roles, setup, TestContext};
use movievault_backend::errors::internal::UserError;
use movievault_backend::errors::{GuardError, InternalError};
use movievault_backend::services::privileged_guard::Requirement;
use movievault_backend::services::{
    IdentityService, PrivilegedGuard, RoleReconciler, TokenService, UserService,
};
use movievault_backend::stores::NewUser;

fn guard(ctx: &TestContext) -> PrivilegedGuard {
    PrivilegedGuard::new(ctx.user_store.clone(), ctx.role_store.clone())
}

fn user_service(ctx: &TestContext) -> UserService {
    UserService::new(
        ctx.user_store.clone(),
        ctx.role_store.clone(),
        Arc::new(RoleReconciler::new(ctx.db.clone())),
        ctx.audit_recorder.clone(),
    )
}

fn identity_service(ctx: &TestContext) -> IdentityService {
    IdentityService::new(
        ctx.user_store.clone(),
        ctx.role_store.clone(),
        Arc::new(TokenService::new("integration-test-secret".to_string())),
        ctx.audit_recorder.clone(),
    )
}

fn role_set(roles: &[&str]) -> BTreeSet<String> {
    roles.iter().map(|r| r.to_string()).collect()
}

#[tokio::test]
async fn guarded_role_update_flow_reaches_the_requested_set() {
    let ctx = setup().await;
    create_user_with_roles(&ctx, "root@movievault.test", "Sup3rSecret!", &["SuperAdmin"]).await;
    let target =
        create_user_with_roles(&ctx, "target@movievault.test", "Passw0rd!", &["Viewer"]).await;

    // The confirmation step resolves the actor independently of any session
    let actor = guard(&ctx)
        .reauthenticate("root@movievault.test", "Sup3rSecret!", Requirement::SuperAdmin)
        .await
        .expect("confirmation should succeed");

    let outcome = user_service(&ctx)
        .update_roles(&actor, target.id, &role_set(&["Admin"]))
        .await
        .expect("role update should succeed");

    assert_eq!(outcome.granted, vec!["Admin".to_string()]);
    assert_eq!(outcome.revoked, vec!["Viewer".to_string()]);

    let roles = ctx.role_store.roles_for_user(target.id).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string()]);
    assert_eq!(
        count_audit_rows(&ctx.db, "UpdateUserRole", Some(target.id)).await,
        1
    );
}

#[tokio::test]
async fn rejected_confirmation_leaves_no_trace() {
    let ctx = setup().await;
    let root =
        create_user_with_roles(&ctx, "root@movievault.test", "Sup3rSecret!", &["SuperAdmin"])
            .await;

    let rejected = guard(&ctx)
        .reauthenticate("root@movievault.test", "wrong-password", Requirement::SuperAdmin)
        .await;
    assert!(matches!(rejected, Err(GuardError::InvalidCredential)));

    // No mutation, no audit entry of any kind
    assert!(ctx.user_store.get_by_id(root.id).await.is_ok());
    let all_rows = count_audit_rows(&ctx.db, "UpdateUserRole", None).await
        + count_audit_rows(&ctx.db, "DeleteUser", None).await
        + count_audit_rows(&ctx.db, "Login", None).await;
    assert_eq!(all_rows, 0);
}

#[tokio::test]
async fn guarded_deletion_respects_the_last_super_admin_invariant() {
    let ctx = setup().await;
    create_user_with_roles(&ctx, "root@movievault.test", "Sup3rSecret!", &["SuperAdmin"]).await;
    let second =
        create_user_with_roles(&ctx, "second@movievault.test", "Sup3rSecret!", &["SuperAdmin"])
            .await;
    let service = user_service(&ctx);

    let actor = guard(&ctx)
        .reauthenticate("root@movievault.test", "Sup3rSecret!", Requirement::SuperAdmin)
        .await
        .unwrap();

    // Two SuperAdmins: deleting one succeeds
    service.delete_user(&actor, second.id).await.unwrap();

    // One left: deleting the confirming actor itself is refused
    let refused = service.delete_user(&actor, actor.id).await;
    assert!(matches!(
        refused,
        Err(InternalError::User(UserError::LastSuperAdmin(_)))
    ));
}

#[tokio::test]
async fn viewer_registration_login_and_logout_flow() {
    let ctx = setup().await;
    let identity = identity_service(&ctx);

    let registered = identity
        .register(NewUser {
            email: "viewer@movievault.test".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            password: "View3rPass!".to_string(),
        })
        .await
        .expect("registration should succeed");

    assert_eq!(registered.roles, vec!["Viewer".to_string()]);
    assert!(!registered.access_token.is_empty());
    assert_eq!(count_audit_rows(&ctx.db, "Register", None).await, 1);

    let login = identity
        .login("viewer@movievault.test", "View3rPass!")
        .await
        .expect("login should succeed");
    assert_eq!(login.user.email, "viewer@movievault.test");
    assert_eq!(count_audit_rows(&ctx.db, "Login", None).await, 1);

    // The login stamped last_login_at
    let user = ctx.user_store.get_by_id(login.user.id).await.unwrap();
    assert!(user.last_login_at.is_some());

    identity
        .logout(login.user.id, &login.user.email)
        .await
        .unwrap();
    assert_eq!(count_audit_rows(&ctx.db, "Logout", None).await, 1);
}

#[tokio::test]
async fn failed_login_writes_no_audit_entry() {
    let ctx = setup().await;
    create_user_with_roles(&ctx, "viewer@movievault.test", "View3rPass!", &["Viewer"]).await;
    let identity = identity_service(&ctx);

    let wrong_password = identity.login("viewer@movievault.test", "nope").await;
    assert!(matches!(
        wrong_password,
        Err(InternalError::User(UserError::InvalidCredential))
    ));

    let unknown_email = identity.login("ghost@movievault.test", "nope").await;
    assert!(matches!(
        unknown_email,
        Err(InternalError::User(UserError::InvalidCredential))
    ));

    assert_eq!(count_audit_rows(&ctx.db, "Login", None).await, 0);
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected_case_insensitively() {
    let ctx = setup().await;
    create_user_with_roles(&ctx, "viewer@movievault.test", "View3rPass!", &["Viewer"]).await;
    let identity = identity_service(&ctx);

    let duplicate = identity
        .register(NewUser {
            email: "Viewer@MovieVault.test".to_string(),
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            password: "Different1!".to_string(),
        })
        .await;

    assert!(matches!(
        duplicate,
        Err(InternalError::User(UserError::EmailTaken(_)))
    ));
}
