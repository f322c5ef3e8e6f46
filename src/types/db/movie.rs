use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Catalog entry. Serialize is derived so mutations can snapshot the row
/// into the audit log.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub rating: String,
    pub price: Decimal,
    pub release_date: Date,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
