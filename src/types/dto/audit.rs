use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::audit_log;

/// One audit trail row as shown in the admin grid
#[derive(Object, Debug)]
pub struct AuditLogResponse {
    pub id: i64,
    pub user_id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl From<audit_log::Model> for AuditLogResponse {
    fn from(log: audit_log::Model) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            previous_state: log.previous_state,
            current_state: log.current_state,
            details: log.details,
            timestamp: log.timestamp,
        }
    }
}

/// One grid page of audit rows
#[derive(Object, Debug)]
pub struct AuditPageResponse {
    pub rows: Vec<AuditLogResponse>,

    /// Match count after filtering, before pagination
    pub total_matching: u64,
}
