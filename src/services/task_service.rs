use tracing::{info, warn};

use crate::{
    db::dao::{DaoLayerError, MembershipDao, NewTask, TaskChanges, TaskDao},
    db::entities::{membership, task},
    error::AppError,
};

#[derive(Clone)]
pub struct TaskService {
    task_dao: TaskDao,
    membership_dao: MembershipDao,
}

impl TaskService {
    pub fn new(task_dao: TaskDao, membership_dao: MembershipDao) -> Self {
        Self {
            task_dao,
            membership_dao,
        }
    }

    pub async fn create_task(&self, new: NewTask) -> Result<task::Model, AppError> {
        let task = self.task_dao.create_task(new).await?;
        info!(task_id = task.id, "task created");
        Ok(task)
    }

    pub async fn find_task(&self, id: i32) -> Result<Option<task::Model>, AppError> {
        Ok(self.task_dao.find_task(id).await?)
    }

    pub async fn require_task(&self, id: i32) -> Result<task::Model, AppError> {
        self.find_task(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("task {id} not found")))
    }

    pub async fn tasks_by_list(&self, list_id: i32) -> Result<Vec<task::Model>, AppError> {
        Ok(self.task_dao.tasks_by_list(list_id).await?)
    }

    pub async fn update_task(&self, id: i32, changes: TaskChanges) -> Result<task::Model, AppError> {
        let task = self.task_dao.update_task(id, changes).await?;
        info!(task_id = id, "task updated");
        Ok(task)
    }

    pub async fn delete_task(&self, id: i32) -> Result<(), AppError> {
        let links = self.task_dao.delete_task(id).await?;
        info!(task_id = id, removed_links = links, "task deleted");
        Ok(())
    }

    pub async fn link(&self, task_id: i32, list_id: i32) -> Result<membership::Model, AppError> {
        match self.membership_dao.link(task_id, list_id).await {
            Ok(link) => {
                info!(task_id, list_id, membership_id = link.id, "task linked to list");
                Ok(link)
            }
            Err(err @ DaoLayerError::AlreadyLinked { .. }) => {
                warn!(task_id, list_id, "task already linked to list");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn unlink(&self, task_id: i32, list_id: i32) -> Result<(), AppError> {
        self.membership_dao.unlink(task_id, list_id).await?;
        info!(task_id, list_id, "task unlinked from list");
        Ok(())
    }

    pub async fn list_ids_for_task(&self, task_id: i32) -> Result<Vec<i32>, AppError> {
        self.require_task(task_id).await?;
        Ok(self.membership_dao.list_ids_for_task(task_id).await?)
    }
}
