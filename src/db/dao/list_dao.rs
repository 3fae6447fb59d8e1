use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::base::today;
use super::{CascadeOutcome, DaoBase, DaoResult, IdAllocator, cascade};
use crate::db::entities::list;
use crate::db::entities::prelude::List;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    pub description: Option<String>,
    pub hidden: bool,
}

/// Full overwrite of the user-editable list attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChanges {
    pub name: String,
    pub description: Option<String>,
    pub hidden: bool,
}

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
    ids: IdAllocator,
}

impl DaoBase for ListDao {
    type Entity = List;

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

impl ListDao {
    pub async fn create_list(&self, new: NewList) -> DaoResult<list::Model> {
        let model = list::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            hidden: Set(new.hidden),
            start_date: Set(today()),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list_visible(&self) -> DaoResult<Vec<list::Model>> {
        self.find_iter(None, None, |query| {
            query.filter(list::Column::Hidden.eq(false))
        })
        .collect_all()
        .await
    }

    pub async fn count_visible(&self) -> DaoResult<u64> {
        self.count(|query| query.filter(list::Column::Hidden.eq(false)))
            .await
    }

    pub async fn find_list(&self, id: i32) -> DaoResult<Option<list::Model>> {
        self.find_by_id(id).await
    }

    pub async fn update_list(&self, id: i32, changes: ListChanges) -> DaoResult<list::Model> {
        self.update(id, move |active| {
            active.name = Set(changes.name);
            active.description = Set(changes.description);
            active.hidden = Set(changes.hidden);
        })
        .await
    }

    pub async fn delete_list(&self, id: i32) -> DaoResult<CascadeOutcome> {
        cascade::delete_list(&self.db, &self.ids, id).await
    }
}
