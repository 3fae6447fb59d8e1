use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};

use crate::{
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/lists/{id}/tasks/{task_id}",
        post(match_list_task).delete(unmatch_list_task),
    )
}

async fn match_list_task(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(i32, i32)>,
) -> ApiResult<i32> {
    let link = state.services.task().link(task_id, list_id).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", link.id)
}

async fn unmatch_list_task(
    State(state): State<Arc<AppState>>,
    Path((list_id, task_id)): Path<(i32, i32)>,
) -> ApiResult<bool> {
    state.services.task().unlink(task_id, list_id).await?;
    JsonApiResponse::ok(true)
}
