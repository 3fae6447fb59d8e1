use tracing::info;

use crate::{
    db::dao::{CascadeOutcome, ListChanges, ListDao, NewList},
    db::entities::list,
    error::AppError,
};

#[derive(Clone)]
pub struct ListService {
    list_dao: ListDao,
}

impl ListService {
    pub fn new(list_dao: ListDao) -> Self {
        Self { list_dao }
    }

    pub async fn create_list(&self, new: NewList) -> Result<list::Model, AppError> {
        let list = self.list_dao.create_list(new).await?;
        info!(list_id = list.id, name = %list.name, "list created");
        Ok(list)
    }

    pub async fn list_visible(&self) -> Result<Vec<list::Model>, AppError> {
        Ok(self.list_dao.list_visible().await?)
    }

    pub async fn count_visible(&self) -> Result<u64, AppError> {
        Ok(self.list_dao.count_visible().await?)
    }

    pub async fn find_list(&self, id: i32) -> Result<Option<list::Model>, AppError> {
        Ok(self.list_dao.find_list(id).await?)
    }

    pub async fn require_list(&self, id: i32) -> Result<list::Model, AppError> {
        self.find_list(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("list {id} not found")))
    }

    pub async fn update_list(&self, id: i32, changes: ListChanges) -> Result<list::Model, AppError> {
        let list = self.list_dao.update_list(id, changes).await?;
        info!(list_id = id, "list updated");
        Ok(list)
    }

    pub async fn delete_list(&self, id: i32) -> Result<CascadeOutcome, AppError> {
        let outcome = self.list_dao.delete_list(id).await?;
        info!(
            list_id = id,
            deleted_tasks = outcome.deleted_tasks.len(),
            preserved_tasks = outcome.preserved_tasks.len(),
            removed_links = outcome.removed_links,
            "list deleted"
        );
        Ok(outcome)
    }
}
