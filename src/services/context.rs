use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{list_service::ListService, task_service::TaskService},
};

/// Built once per process and cloned into request handlers; clones share the
/// underlying identifier locks.
#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list())
    }

    pub fn task(&self) -> TaskService {
        TaskService::new(self.daos.task(), self.daos.membership())
    }
}
