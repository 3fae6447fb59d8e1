use sea_orm::entity::prelude::Date;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use super::base::{delete_row, finish, require_row, today};
use super::{DaoBase, DaoResult, IdAllocator};
use crate::db::entities::prelude::{List, Membership, Task};
use crate::db::entities::{membership, task};

/// Unset flags default to `false`, importance to `0` and the start date to
/// today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub link_one: Option<String>,
    pub link_two: Option<String>,
    pub notify: Option<bool>,
    pub completed: Option<bool>,
    pub hidden: Option<bool>,
    pub importance: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link_one: Option<String>,
    pub link_two: Option<String>,
    pub notify: Option<bool>,
    pub completed: Option<bool>,
    pub hidden: Option<bool>,
    pub importance: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone)]
pub struct TaskDao {
    db: DatabaseConnection,
    ids: IdAllocator,
}

impl DaoBase for TaskDao {
    type Entity = Task;

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

impl TaskDao {
    pub async fn create_task(&self, new: NewTask) -> DaoResult<task::Model> {
        let model = task::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            link_one: Set(new.link_one),
            link_two: Set(new.link_two),
            notify: Set(new.notify.unwrap_or(false)),
            completed: Set(new.completed.unwrap_or(false)),
            hidden: Set(new.hidden.unwrap_or(false)),
            importance: Set(new.importance.unwrap_or(0)),
            start_date: Set(new.start_date.unwrap_or_else(today)),
            end_date: Set(new.end_date),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_task(&self, id: i32) -> DaoResult<Option<task::Model>> {
        self.find_by_id(id).await
    }

    /// Visible tasks linked to `list_id`, in identifier order.
    pub async fn tasks_by_list(&self, list_id: i32) -> DaoResult<Vec<task::Model>> {
        require_row::<List, _>(&self.db, list_id).await?;
        self.find_iter(None, None, move |query| {
            query
                .filter(task::Column::Id.in_subquery(
                    Query::select()
                        .column(membership::Column::TaskId)
                        .from(Membership)
                        .and_where(membership::Column::ListId.eq(list_id))
                        .to_owned(),
                ))
                .filter(task::Column::Hidden.eq(false))
        })
        .collect_all()
        .await
    }

    pub async fn update_task(&self, id: i32, changes: TaskChanges) -> DaoResult<task::Model> {
        self.update(id, move |active| {
            let TaskChanges {
                name,
                description,
                link_one,
                link_two,
                notify,
                completed,
                hidden,
                importance,
                start_date,
                end_date,
            } = changes;
            if let Some(name) = name {
                active.name = Set(name);
            }
            if let Some(description) = description {
                active.description = Set(Some(description));
            }
            if let Some(link_one) = link_one {
                active.link_one = Set(Some(link_one));
            }
            if let Some(link_two) = link_two {
                active.link_two = Set(Some(link_two));
            }
            if let Some(notify) = notify {
                active.notify = Set(notify);
            }
            if let Some(completed) = completed {
                active.completed = Set(completed);
            }
            if let Some(hidden) = hidden {
                active.hidden = Set(hidden);
            }
            if let Some(importance) = importance {
                active.importance = Set(importance);
            }
            if let Some(start_date) = start_date {
                active.start_date = Set(start_date);
            }
            if let Some(end_date) = end_date {
                active.end_date = Set(Some(end_date));
            }
        })
        .await
    }

    /// Removes every link of the task and then the task itself. Returns the
    /// number of links removed.
    pub async fn delete_task(&self, id: i32) -> DaoResult<u64> {
        let _guard = self.ids.write().await;
        let txn = self.db.begin().await?;
        let result = delete_task_in(&txn, id).await;
        finish(txn, result).await
    }
}

async fn delete_task_in<C>(conn: &C, id: i32) -> DaoResult<u64>
where
    C: ConnectionTrait,
{
    let links = Membership::delete_many()
        .filter(membership::Column::TaskId.eq(id))
        .exec(conn)
        .await?;
    delete_row::<Task, _>(conn, id).await?;
    Ok(links.rows_affected)
}
