use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    pub name: String,
    pub description: Option<String>,
    pub hidden: bool,
    pub start_date: Date,
}

impl ActiveModelBehavior for ActiveModel {}
