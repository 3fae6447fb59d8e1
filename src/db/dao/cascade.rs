//! List deletion with conditional task cleanup.
//!
//! Tasks linked only to the deleted list go with it. Tasks that are also
//! linked to another list survive and only lose their link to the deleted
//! list. The whole sequence runs in one transaction, so a failure at any
//! step (including a missing list row at the end) leaves the store as it
//! was.

use std::collections::BTreeSet;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};

use super::base::{delete_row, finish};
use super::error::DaoResult;
use super::id_allocator::IdAllocator;
use crate::db::entities::prelude::{List, Membership, Task};
use crate::db::entities::{membership, task};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CascadeOutcome {
    pub list_id: i32,
    /// Tasks that were linked only to this list and were deleted.
    pub deleted_tasks: Vec<i32>,
    /// Tasks still linked to at least one other list.
    pub preserved_tasks: Vec<i32>,
    pub removed_links: u64,
}

/// Runs the cascade in its own transaction under the store's write guard, so
/// no link to a member task can commit between the shared-task query and
/// the deletes.
pub async fn delete_list(
    db: &DatabaseConnection,
    ids: &IdAllocator,
    list_id: i32,
) -> DaoResult<CascadeOutcome> {
    let _guard = ids.write().await;
    let txn = db.begin().await?;
    let result = delete_list_in(&txn, list_id).await;
    finish(txn, result).await
}

/// Runs the cascade on `conn` without opening a transaction of its own.
pub async fn delete_list_in<C>(conn: &C, list_id: i32) -> DaoResult<CascadeOutcome>
where
    C: ConnectionTrait,
{
    let members: BTreeSet<i32> = Membership::find()
        .select_only()
        .column(membership::Column::TaskId)
        .filter(membership::Column::ListId.eq(list_id))
        .into_tuple::<i32>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    let shared = if members.is_empty() {
        BTreeSet::new()
    } else {
        linked_elsewhere(conn, list_id, &members).await?
    };

    let (preserved_tasks, deleted_tasks): (Vec<i32>, Vec<i32>) =
        members.iter().copied().partition(|id| shared.contains(id));

    if !deleted_tasks.is_empty() {
        Task::delete_many()
            .filter(task::Column::Id.is_in(deleted_tasks.iter().copied()))
            .exec(conn)
            .await?;
    }

    let removed = Membership::delete_many()
        .filter(membership::Column::ListId.eq(list_id))
        .exec(conn)
        .await?;

    delete_row::<List, _>(conn, list_id).await?;

    Ok(CascadeOutcome {
        list_id,
        deleted_tasks,
        preserved_tasks,
        removed_links: removed.rows_affected,
    })
}

/// Which of `task_ids` are linked to some list other than `list_id`.
async fn linked_elsewhere<C>(
    conn: &C,
    list_id: i32,
    task_ids: &BTreeSet<i32>,
) -> DaoResult<BTreeSet<i32>>
where
    C: ConnectionTrait,
{
    let shared = Membership::find()
        .select_only()
        .column(membership::Column::TaskId)
        .filter(membership::Column::TaskId.is_in(task_ids.iter().copied()))
        .filter(membership::Column::ListId.ne(list_id))
        .distinct()
        .into_tuple::<i32>()
        .all(conn)
        .await?;
    Ok(shared.into_iter().collect())
}
