use sea_orm::entity::prelude::*;

/// Highest identifier ever handed out per table. Survives deletion of the
/// rows themselves, so freed identifiers are not allocated again.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "id_sequences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub table_name: String,
    pub last_id: i32,
}

impl ActiveModelBehavior for ActiveModel {}
