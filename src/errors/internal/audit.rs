use thiserror::Error;

/// Errors raised while building or persisting audit records
///
/// Persistence failures surface as `DatabaseError` through the store; these
/// cover the recorder's own invariants.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit record has no actor: an actor id is required for all audit entries")]
    MissingActor,

    #[error("Failed to serialize audit state snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}
