use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::InternalError;
use crate::stores::paging::{field_matches, paginate, Page, PageRequest};
use crate::types::db::audit_log::{self, Entity as AuditLog};

/// A fully-assembled audit record ready to persist
///
/// Built by the recorder; the timestamp is set here at write time.
#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    pub user_id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
    pub details: String,
}

/// Repository for the append-only audit trail
///
/// Exposes insert and read paths only; nothing in the application updates
/// or deletes a row once written.
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append an audit record, stamping it with the current UTC time
    ///
    /// # Errors
    /// Returns `InternalError` when the insert fails; callers must treat
    /// that as a failure of the audited operation, not swallow it.
    pub async fn append(&self, record: NewAuditRecord) -> Result<audit_log::Model, InternalError> {
        let model = audit_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(record.user_id),
            action: Set(record.action),
            entity_type: Set(record.entity_type),
            entity_id: Set(record.entity_id),
            previous_state: Set(record.previous_state),
            current_state: Set(record.current_state),
            details: Set(record.details),
            timestamp: Set(Utc::now()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("append_audit_log", e))
    }

    /// Free-text search over the trail for the grid UI, newest first
    ///
    /// The query matches action, entity type, details, actor id, entity id
    /// and both state snapshots; `total_matching` counts rows after
    /// filtering, before pagination.
    pub async fn search_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<audit_log::Model>, InternalError> {
        let logs = AuditLog::find()
            .order_by_desc(audit_log::Column::Timestamp)
            .order_by_desc(audit_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_audit_logs", e))?;

        Ok(paginate(logs, request, log_matches))
    }
}

fn log_matches(log: &audit_log::Model, query: &str) -> bool {
    field_matches(&log.action, query)
        || field_matches(&log.entity_type, query)
        || field_matches(&log.details, query)
        || log.user_id.to_string().contains(query)
        || log
            .entity_id
            .is_some_and(|id| id.to_string().contains(query))
        || log
            .previous_state
            .as_deref()
            .is_some_and(|state| field_matches(state, query))
        || log
            .current_state
            .as_deref()
            .is_some_and(|state| field_matches(state, query))
}
