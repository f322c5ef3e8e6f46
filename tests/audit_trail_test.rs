mod common;

use common::{create_user_with_roles, setup};
use movievault_backend::stores::PageRequest;
use movievault_backend::types::internal::audit::{AuditAction, EntityKind};
use sea_orm::EntityTrait;

use movievault_backend::types::db::audit_log;

#[tokio::test]
async fn details_of_600_chars_persist_exactly_the_first_500() {
    let ctx = setup().await;
    let actor = create_user_with_roles(&ctx, "root@movievault.test", "Passw0rd!", &[]).await;

    let details = "d".repeat(600);
    ctx.audit_recorder
        .entry(AuditAction::UpdateUserRole, EntityKind::User)
        .actor(actor.id)
        .entity_id(5)
        .details(details.clone())
        .write()
        .await
        .expect("audit write should succeed");

    let stored = audit_log::Entity::find()
        .one(&ctx.db)
        .await
        .unwrap()
        .expect("one audit row");
    assert_eq!(stored.details.chars().count(), 500);
    assert_eq!(stored.details, details[..500]);
}

#[tokio::test]
async fn absent_snapshots_are_stored_as_null() {
    let ctx = setup().await;
    let actor = create_user_with_roles(&ctx, "root@movievault.test", "Passw0rd!", &[]).await;

    ctx.audit_recorder
        .entry(AuditAction::Login, EntityKind::User)
        .actor(actor.id)
        .entity_id(actor.id)
        .details("User root@movievault.test logged in")
        .write()
        .await
        .unwrap();

    let stored = audit_log::Entity::find().one(&ctx.db).await.unwrap().unwrap();
    assert!(stored.previous_state.is_none());
    assert!(stored.current_state.is_none());
    assert_eq!(stored.action, "Login");
    assert_eq!(stored.entity_type, "User");
    assert_eq!(stored.user_id, actor.id);
}

#[tokio::test]
async fn search_matches_across_all_audit_fields() {
    let ctx = setup().await;
    let actor = create_user_with_roles(&ctx, "root@movievault.test", "Passw0rd!", &[]).await;

    ctx.audit_recorder
        .entry(AuditAction::CreateMovie, EntityKind::Movie)
        .actor(actor.id)
        .entity_id(31)
        .details("Created movie: Inception")
        .current_state(&serde_json::json!({ "title": "Inception" }))
        .unwrap()
        .write()
        .await
        .unwrap();
    ctx.audit_recorder
        .entry(AuditAction::DeleteUser, EntityKind::User)
        .actor(actor.id)
        .entity_id(62)
        .details("Deleted user: ghost@example.test")
        .write()
        .await
        .unwrap();

    // Action name, normalized
    let by_action = ctx
        .audit_store
        .search_page(&PageRequest::new(None, None, Some("create-movie".to_string())))
        .await
        .unwrap();
    assert_eq!(by_action.total_matching, 1);
    assert_eq!(by_action.rows[0].action, "CreateMovie");

    // Entity type
    let by_entity_type = ctx
        .audit_store
        .search_page(&PageRequest::new(None, None, Some("Movie".to_string())))
        .await
        .unwrap();
    assert_eq!(by_entity_type.total_matching, 1);

    // Entity id as digits
    let by_entity_id = ctx
        .audit_store
        .search_page(&PageRequest::new(None, None, Some("62".to_string())))
        .await
        .unwrap();
    assert_eq!(by_entity_id.total_matching, 1);
    assert_eq!(by_entity_id.rows[0].action, "DeleteUser");

    // Snapshot contents
    let by_state = ctx
        .audit_store
        .search_page(&PageRequest::new(None, None, Some("inception".to_string())))
        .await
        .unwrap();
    assert_eq!(by_state.total_matching, 1);

    // Details free text
    let by_details = ctx
        .audit_store
        .search_page(&PageRequest::new(None, None, Some("ghost".to_string())))
        .await
        .unwrap();
    assert_eq!(by_details.total_matching, 1);
}

#[tokio::test]
async fn search_returns_newest_first_and_counts_before_paging() {
    let ctx = setup().await;
    let actor = create_user_with_roles(&ctx, "root@movievault.test", "Passw0rd!", &[]).await;

    for i in 0..15 {
        ctx.audit_recorder
            .entry(AuditAction::UpdateMovie, EntityKind::Movie)
            .actor(actor.id)
            .entity_id(i)
            .details(format!("Updated movie: entry {i} (Image: None)"))
            .write()
            .await
            .unwrap();
    }

    let page = ctx
        .audit_store
        .search_page(&PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_matching, 15);
    assert_eq!(page.rows.len(), 10);
    // Newest first: the last entry written leads the page
    assert_eq!(page.rows[0].entity_id, Some(14));
    assert!(page.rows.windows(2).all(|w| w[0].id > w[1].id));
}
