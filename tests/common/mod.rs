// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use movievault_backend::services::AuditRecorder;
use movievault_backend::stores::{AuditStore, MovieStore, NewUser, RoleStore, UserStore};
use movievault_backend::types::db::{audit_log, user};
use movievault_backend::types::internal::auth::Actor;

pub const TEST_PEPPER: &str = "test-pepper-for-integration-tests";

/// Every store over one in-memory database with migrations applied
pub struct TestContext {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub role_store: Arc<RoleStore>,
    pub movie_store: Arc<MovieStore>,
    pub audit_store: Arc<AuditStore>,
    pub audit_recorder: Arc<AuditRecorder>,
}

/// Create a test database and stores with standard configuration
pub async fn setup() -> TestContext {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let user_store = Arc::new(UserStore::new(db.clone(), TEST_PEPPER.to_string()));
    let role_store = Arc::new(RoleStore::new(db.clone()));
    let movie_store = Arc::new(MovieStore::new(db.clone()));
    let audit_store = Arc::new(AuditStore::new(db.clone()));
    let audit_recorder = Arc::new(AuditRecorder::new(audit_store.clone()));

    TestContext {
        db,
        user_store,
        role_store,
        movie_store,
        audit_store,
        audit_recorder,
    }
}

/// Create a user and grant it the given roles
pub async fn create_user_with_roles(
    ctx: &TestContext,
    email: &str,
    password: &str,
    roles: &[&str],
) -> user::Model {
    let user = ctx
        .user_store
        .create(NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: password.to_string(),
        })
        .await
        .expect("Failed to create test user");

    for role in roles {
        ctx.role_store
            .add_to_role(user.id, role)
            .await
            .expect("Failed to grant role");
    }

    user
}

/// Build an Actor as the privileged guard would return it
pub fn actor_for(user: &user::Model, roles: &[&str]) -> Actor {
    Actor {
        id: user.id,
        email: user.email.clone(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Count audit rows with the given action, optionally narrowed to one
/// entity id
pub async fn count_audit_rows(
    db: &DatabaseConnection,
    action: &str,
    entity_id: Option<i32>,
) -> u64 {
    let mut query = audit_log::Entity::find().filter(audit_log::Column::Action.eq(action));
    if let Some(id) = entity_id {
        query = query.filter(audit_log::Column::EntityId.eq(id));
    }
    query.count(db).await.expect("Failed to count audit rows")
}
