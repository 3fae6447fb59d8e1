use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use sea_orm::prelude::Date;
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::{NewTask, TaskChanges},
    db::entities::task,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::{normalize_name, normalize_optional},
    services::TaskService,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
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

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
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

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub link_one: Option<String>,
    pub link_two: Option<String>,
    pub notify: bool,
    pub completed: bool,
    pub hidden: bool,
    pub importance: i32,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", post(add_task))
        .route(
            "/tasks/{id}",
            get(get_task_by_id).patch(update_task).delete(delete_task),
        )
        .route("/tasks/{id}/lists", get(get_lists_of_task))
        .route("/lists/{id}/tasks", get(get_tasks_by_list))
}

async fn add_task(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<i32> {
    let name = normalize_name("name", &body.name)?.to_string();
    let task = task_service(&state)
        .create_task(NewTask {
            name,
            description: normalize_optional(body.description),
            link_one: normalize_optional(body.link_one),
            link_two: normalize_optional(body.link_two),
            notify: body.notify,
            completed: body.completed,
            hidden: body.hidden,
            importance: body.importance,
            start_date: body.start_date,
            end_date: body.end_date,
        })
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", task.id)
}

async fn get_task_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<TaskResponse> {
    let task = task_service(&state).require_task(id).await?;
    JsonApiResponse::ok(task.into())
}

async fn get_tasks_by_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
) -> ApiResult<Vec<TaskResponse>> {
    let tasks = task_service(&state).tasks_by_list(list_id).await?;
    JsonApiResponse::ok(tasks.into_iter().map(TaskResponse::from).collect())
}

async fn get_lists_of_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<i32>> {
    let list_ids = task_service(&state).list_ids_for_task(id).await?;
    JsonApiResponse::ok(list_ids)
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let changes = task_changes(body)?;
    if changes.is_empty() {
        return Err(AppError::bad_request("at least one task field is required"));
    }
    let task = task_service(&state).update_task(id, changes).await?;
    JsonApiResponse::ok(task.into())
}

async fn delete_task(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<bool> {
    task_service(&state).delete_task(id).await?;
    JsonApiResponse::ok(true)
}

fn task_changes(body: UpdateTaskRequest) -> Result<TaskChanges, AppError> {
    let name = match body.name {
        Some(name) => Some(normalize_name("name", &name)?.to_string()),
        None => None,
    };
    Ok(TaskChanges {
        name,
        description: normalize_optional(body.description),
        link_one: normalize_optional(body.link_one),
        link_two: normalize_optional(body.link_two),
        notify: body.notify,
        completed: body.completed,
        hidden: body.hidden,
        importance: body.importance,
        start_date: body.start_date,
        end_date: body.end_date,
    })
}

impl From<task::Model> for TaskResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            link_one: model.link_one,
            link_two: model.link_two,
            notify: model.notify,
            completed: model.completed,
            hidden: model.hidden,
            importance: model.importance,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

fn task_service(state: &AppState) -> TaskService {
    state.services.task()
}
