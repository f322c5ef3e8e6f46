mod common;

use std::collections::BTreeSet;

use common::{create_user_with_roles, setup};
use movievault_backend::errors::internal::UserError;
use movievault_backend::errors::InternalError;
use movievault_backend::services::RoleReconciler;

fn role_set(roles: &[&str]) -> BTreeSet<String> {
    roles.iter().map(|r| r.to_string()).collect()
}

#[tokio::test]
async fn reconcile_moves_user_to_exactly_the_requested_set() {
    let ctx = setup().await;
    let user =
        create_user_with_roles(&ctx, "user@movievault.test", "Passw0rd!", &["Admin", "Viewer"])
            .await;
    let reconciler = RoleReconciler::new(ctx.db.clone());

    let outcome = reconciler
        .reconcile(user.id, &role_set(&["Admin", "SuperAdmin"]))
        .await
        .expect("reconcile should succeed");

    // Admin sits in both sets and is untouched; the diff is minimal
    assert_eq!(outcome.granted, vec!["SuperAdmin".to_string()]);
    assert_eq!(outcome.revoked, vec!["Viewer".to_string()]);

    let roles = ctx.role_store.roles_for_user(user.id).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string(), "SuperAdmin".to_string()]);
}

#[tokio::test]
async fn reconcile_to_the_current_set_performs_no_writes() {
    let ctx = setup().await;
    let user =
        create_user_with_roles(&ctx, "user@movievault.test", "Passw0rd!", &["Admin", "Viewer"])
            .await;
    let reconciler = RoleReconciler::new(ctx.db.clone());

    let outcome = reconciler
        .reconcile(user.id, &role_set(&["Admin", "Viewer"]))
        .await
        .expect("reconcile should succeed");

    assert!(outcome.unchanged());
    assert!(outcome.granted.is_empty());
    assert!(outcome.revoked.is_empty());

    let roles = ctx.role_store.roles_for_user(user.id).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string(), "Viewer".to_string()]);
}

#[tokio::test]
async fn reconcile_to_the_empty_set_revokes_everything() {
    let ctx = setup().await;
    let user =
        create_user_with_roles(&ctx, "user@movievault.test", "Passw0rd!", &["Viewer"]).await;
    let reconciler = RoleReconciler::new(ctx.db.clone());

    let outcome = reconciler
        .reconcile(user.id, &BTreeSet::new())
        .await
        .expect("empty target is permitted; callers enforce invariants");

    assert_eq!(outcome.revoked, vec!["Viewer".to_string()]);
    let roles = ctx.role_store.roles_for_user(user.id).await.unwrap();
    assert!(roles.is_empty());
}

#[tokio::test]
async fn reconcile_creates_missing_role_rows_before_granting() {
    let ctx = setup().await;
    let user = create_user_with_roles(&ctx, "user@movievault.test", "Passw0rd!", &[]).await;
    let reconciler = RoleReconciler::new(ctx.db.clone());

    // No seeding ran; the Admin role row does not exist yet
    assert!(!ctx.role_store.role_exists("Admin").await.unwrap());

    reconciler
        .reconcile(user.id, &role_set(&["Admin"]))
        .await
        .expect("reconcile should create the role row lazily");

    assert!(ctx.role_store.role_exists("Admin").await.unwrap());
    let roles = ctx.role_store.roles_for_user(user.id).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string()]);
}

#[tokio::test]
async fn reconcile_is_idempotent_across_repeated_calls() {
    let ctx = setup().await;
    let user =
        create_user_with_roles(&ctx, "user@movievault.test", "Passw0rd!", &["Viewer"]).await;
    let reconciler = RoleReconciler::new(ctx.db.clone());
    let target = role_set(&["Admin", "Viewer"]);

    let first = reconciler.reconcile(user.id, &target).await.unwrap();
    assert_eq!(first.granted, vec!["Admin".to_string()]);

    let second = reconciler.reconcile(user.id, &target).await.unwrap();
    assert!(second.unchanged());

    let roles = ctx.role_store.roles_for_user(user.id).await.unwrap();
    assert_eq!(roles, vec!["Admin".to_string(), "Viewer".to_string()]);
}

#[tokio::test]
async fn reconcile_unknown_user_is_not_found() {
    let ctx = setup().await;
    let reconciler = RoleReconciler::new(ctx.db.clone());

    let result = reconciler.reconcile(424242, &role_set(&["Viewer"])).await;

    assert!(matches!(
        result,
        Err(InternalError::User(UserError::NotFound(424242)))
    ));
    // Nothing was created as a side effect
    assert!(!ctx.role_store.role_exists("Viewer").await.unwrap());
}
