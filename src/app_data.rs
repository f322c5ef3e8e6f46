use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::{AuditRecorder, TokenService};
use crate::stores::{AuditStore, MovieStore, RoleStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All stores are created once at startup and shared across the service
/// layer as Arcs; services are constructed from these in main. The audit
/// store is created first since the recorder depends on it.
pub struct AppData {
    pub db: DatabaseConnection,
    pub user_store: Arc<UserStore>,
    pub role_store: Arc<RoleStore>,
    pub movie_store: Arc<MovieStore>,
    pub audit_store: Arc<AuditStore>,
    pub audit_recorder: Arc<AuditRecorder>,
    pub token_service: Arc<TokenService>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be migrated before calling this.
    pub fn init(db: DatabaseConnection, settings: &Settings) -> Self {
        tracing::debug!("Creating stores...");

        let audit_store = Arc::new(AuditStore::new(db.clone()));
        let audit_recorder = Arc::new(AuditRecorder::new(audit_store.clone()));

        let user_store = Arc::new(UserStore::new(
            db.clone(),
            settings.password_pepper.clone(),
        ));
        let role_store = Arc::new(RoleStore::new(db.clone()));
        let movie_store = Arc::new(MovieStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));

        tracing::debug!("Stores created");

        Self {
            db,
            user_store,
            role_store,
            movie_store,
            audit_store,
            audit_recorder,
            token_service,
        }
    }
}
