use sea_orm::entity::prelude::*;

/// Append-only audit record. References actor and entity by id only; no
/// foreign keys, since both may be deleted after the row is written.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i32,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i32>,
    pub previous_state: Option<String>,
    pub current_state: Option<String>,
    pub details: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
