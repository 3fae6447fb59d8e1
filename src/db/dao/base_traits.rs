use sea_orm::{EntityTrait, IntoActiveModel, PrimaryKeyTrait};

pub trait HasIdColumn: EntityTrait {
    fn id_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: i32);
}

/// Everything the DAO layer needs from an entity: an `i32` key it assigns
/// itself and models that can cross await points.
pub trait DaoEntity:
    EntityTrait<
        ActiveModel: HasIdActiveModel + Send,
        Model: Sync + IntoActiveModel<<Self as EntityTrait>::ActiveModel>,
        PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    > + HasIdColumn
    + Send
    + Sync
{
}

impl<E> DaoEntity for E where
    E: EntityTrait<
            ActiveModel: HasIdActiveModel + Send,
            Model: Sync + IntoActiveModel<<E as EntityTrait>::ActiveModel>,
            PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
        > + HasIdColumn
        + Send
        + Sync
{
}
