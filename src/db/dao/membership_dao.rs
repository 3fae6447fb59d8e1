use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};

use super::base::{finish, insert_with_next_id, require_row};
use super::{DaoBase, DaoLayerError, DaoResult, IdAllocator};
use crate::db::entities::membership;
use crate::db::entities::prelude::{List, Membership, Task};

#[derive(Clone)]
pub struct MembershipDao {
    db: DatabaseConnection,
    ids: IdAllocator,
}

impl DaoBase for MembershipDao {
    type Entity = Membership;

    fn new(db: &DatabaseConnection, ids: &IdAllocator) -> Self {
        Self {
            db: db.clone(),
            ids: ids.clone(),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    fn ids(&self) -> &IdAllocator {
        &self.ids
    }
}

impl MembershipDao {
    /// Links a task to a list. Both must exist and the pair must not be
    /// linked already.
    pub async fn link(&self, task_id: i32, list_id: i32) -> DaoResult<membership::Model> {
        let _guard = self.ids.write().await;
        let txn = self.db.begin().await?;
        let result = link_in(&txn, task_id, list_id).await;
        finish(txn, result).await
    }

    pub async fn unlink(&self, task_id: i32, list_id: i32) -> DaoResult<()> {
        let _guard = self.ids.write().await;
        let result = Membership::delete_many()
            .filter(membership::Column::TaskId.eq(task_id))
            .filter(membership::Column::ListId.eq(list_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotLinked { task_id, list_id });
        }
        Ok(())
    }

    pub async fn list_ids_for_task(&self, task_id: i32) -> DaoResult<Vec<i32>> {
        Ok(Membership::find()
            .select_only()
            .column(membership::Column::ListId)
            .filter(membership::Column::TaskId.eq(task_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?)
    }
}

async fn link_in<C>(conn: &C, task_id: i32, list_id: i32) -> DaoResult<membership::Model>
where
    C: ConnectionTrait,
{
    require_row::<Task, _>(conn, task_id).await?;
    require_row::<List, _>(conn, list_id).await?;

    let existing = Membership::find()
        .filter(membership::Column::TaskId.eq(task_id))
        .filter(membership::Column::ListId.eq(list_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Err(DaoLayerError::AlreadyLinked { task_id, list_id });
    }

    let model = membership::ActiveModel {
        task_id: Set(task_id),
        list_id: Set(list_id),
        ..Default::default()
    };
    insert_with_next_id::<Membership, _, _>(conn, model).await
}
