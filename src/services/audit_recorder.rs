use std::sync::Arc;

use serde::Serialize;

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::stores::{AuditStore, NewAuditRecord};
use crate::types::db::audit_log;
use crate::types::internal::audit::{AuditAction, EntityKind};

/// Details column width; longer text is cut, no marker is appended
const MAX_DETAILS_CHARS: usize = 500;

/// Records who did what to which entity, with optional before/after
/// snapshots
///
/// Entries are assembled through a builder and persisted through the
/// append-only audit store. A failed write propagates to the caller: a
/// destructive action must not be reported successful when its audit row
/// could not be written. Writes are never retried here; the caller decides
/// whether to retry the whole operation.
pub struct AuditRecorder {
    audit_store: Arc<AuditStore>,
}

impl AuditRecorder {
    /// Create a new AuditRecorder writing through the given store
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    /// Start an audit entry for the given action and entity kind
    pub fn entry(&self, action: AuditAction, entity_type: EntityKind) -> AuditEntryBuilder {
        AuditEntryBuilder {
            store: self.audit_store.clone(),
            action,
            entity_type,
            actor_id: None,
            entity_id: None,
            details: String::new(),
            previous_state: None,
            current_state: None,
        }
    }
}

/// Builder for a single audit entry
///
/// State snapshots are serialized to JSON independently of each other; an
/// absent snapshot is stored as NULL, not as an empty string.
pub struct AuditEntryBuilder {
    store: Arc<AuditStore>,
    action: AuditAction,
    entity_type: EntityKind,
    actor_id: Option<i32>,
    entity_id: Option<i32>,
    details: String,
    previous_state: Option<String>,
    current_state: Option<String>,
}

impl AuditEntryBuilder {
    /// Set the acting user; required before `write`
    pub fn actor(mut self, user_id: i32) -> Self {
        self.actor_id = Some(user_id);
        self
    }

    /// Set the id of the entity the action touched
    pub fn entity_id(mut self, id: i32) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Set the free-text details line
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Serialize and attach the pre-mutation state
    pub fn previous_state<T: Serialize>(mut self, state: &T) -> Result<Self, InternalError> {
        self.previous_state = Some(serialize_state(state)?);
        Ok(self)
    }

    /// Serialize and attach the post-mutation state
    pub fn current_state<T: Serialize>(mut self, state: &T) -> Result<Self, InternalError> {
        self.current_state = Some(serialize_state(state)?);
        Ok(self)
    }

    /// Persist the entry
    ///
    /// # Errors
    /// * `AuditError::MissingActor` when no actor was set
    /// * `InternalError` when the insert fails; the error is propagated so
    ///   the enclosing operation does not report success without its trail
    pub async fn write(self) -> Result<audit_log::Model, InternalError> {
        let store = self.store.clone();
        let record = self.into_record()?;

        let written = store.append(record).await.inspect_err(|e| {
            tracing::error!("Failed to write audit record: {}", e);
        })?;

        tracing::info!(
            "Audit log recorded: user {} performed {} on {} (id: {:?})",
            written.user_id,
            written.action,
            written.entity_type,
            written.entity_id,
        );

        Ok(written)
    }

    /// Assemble the record, truncating details to the column width
    fn into_record(self) -> Result<NewAuditRecord, InternalError> {
        let actor_id = self.actor_id.ok_or(AuditError::MissingActor)?;

        let details = if self.details.chars().count() > MAX_DETAILS_CHARS {
            self.details.chars().take(MAX_DETAILS_CHARS).collect()
        } else {
            self.details
        };

        Ok(NewAuditRecord {
            user_id: actor_id,
            action: self.action.as_str().to_string(),
            entity_type: self.entity_type.as_str().to_string(),
            entity_id: self.entity_id,
            previous_state: self.previous_state,
            current_state: self.current_state,
            details,
        })
    }
}

fn serialize_state<T: Serialize>(state: &T) -> Result<String, InternalError> {
    serde_json::to_string(state)
        .map_err(|e| InternalError::from(AuditError::Serialization(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    // Builder assembly never touches the database; a bare in-memory
    // connection satisfies the constructor.
    async fn recorder() -> AuditRecorder {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        AuditRecorder::new(Arc::new(AuditStore::new(db)))
    }

    #[tokio::test]
    async fn details_longer_than_500_chars_truncate_exactly() {
        let long_details = "x".repeat(600);
        let record = recorder()
            .await
            .entry(AuditAction::DeleteMovie, EntityKind::Movie)
            .actor(1)
            .details(long_details.clone())
            .into_record()
            .unwrap();

        assert_eq!(record.details.chars().count(), 500);
        assert_eq!(record.details, long_details[..500]);
    }

    #[tokio::test]
    async fn short_details_are_kept_verbatim() {
        let record = recorder()
            .await
            .entry(AuditAction::CreateMovie, EntityKind::Movie)
            .actor(1)
            .details("Created movie: Inception")
            .into_record()
            .unwrap();

        assert_eq!(record.details, "Created movie: Inception");
    }

    #[tokio::test]
    async fn absent_snapshots_stay_null() {
        let record = recorder()
            .await
            .entry(AuditAction::DeleteUser, EntityKind::User)
            .actor(7)
            .entity_id(12)
            .into_record()
            .unwrap();

        assert!(record.previous_state.is_none());
        assert!(record.current_state.is_none());
    }

    #[tokio::test]
    async fn snapshots_serialize_independently() {
        let record = recorder()
            .await
            .entry(AuditAction::UpdateUserRole, EntityKind::User)
            .actor(1)
            .previous_state(&vec!["Viewer"])
            .unwrap()
            .current_state(&vec!["Admin", "Viewer"])
            .unwrap()
            .into_record()
            .unwrap();

        assert_eq!(record.previous_state.as_deref(), Some(r#"["Viewer"]"#));
        assert_eq!(
            record.current_state.as_deref(),
            Some(r#"["Admin","Viewer"]"#)
        );
    }

    #[tokio::test]
    async fn missing_actor_is_rejected() {
        let result = recorder()
            .await
            .entry(AuditAction::Login, EntityKind::User)
            .details("no actor set")
            .into_record();

        assert!(matches!(
            result,
            Err(InternalError::Audit(AuditError::MissingActor))
        ));
    }
}
