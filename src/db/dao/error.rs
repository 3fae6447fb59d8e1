use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i32 },
    #[error("task {task_id} is already linked to list {list_id}")]
    AlreadyLinked { task_id: i32, list_id: i32 },
    #[error("task {task_id} is not linked to list {list_id}")]
    NotLinked { task_id: i32, list_id: i32 },
    #[error("identifier space exhausted for {entity}")]
    IdSpaceExhausted { entity: &'static str },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;
