use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    pub name: String,
    pub description: Option<String>,
    pub link_one: Option<String>,
    pub link_two: Option<String>,
    pub notify: bool,
    pub completed: bool,
    pub hidden: bool,
    pub importance: i32,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

impl ActiveModelBehavior for ActiveModel {}
