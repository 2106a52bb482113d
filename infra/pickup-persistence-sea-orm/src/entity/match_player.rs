use chrono::Utc;
use sea_orm::entity::prelude::*;

/// One row per (match_id, user_id); the pair carries a unique index created
/// alongside the table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "match_players")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    pub match_id: i64,
    pub user_id: i64,
    pub status: String,
    pub team: Option<String>,
    pub slot: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
