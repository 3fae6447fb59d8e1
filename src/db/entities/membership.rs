use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// Link between one task and one list. Both columns are plain integers:
/// the DAO layer checks the endpoints exist and removes links when either
/// side is deleted.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "list_tasks")]
pub struct Model {
    #[sea_orm(indexed)]
    pub task_id: i32,
    #[sea_orm(indexed)]
    pub list_id: i32,
}

impl ActiveModelBehavior for ActiveModel {}
