use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::Date;
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::{ListChanges, NewList},
    db::entities::list,
    response::{ApiResult, JsonApiResponse},
    routes::{normalize_name, normalize_optional},
    services::ListService,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

/// Replaces every editable attribute; an omitted description clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub hidden: bool,
    pub start_date: Date,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(get_all_lists).post(add_list))
        .route(
            "/lists/{id}",
            get(get_list_by_id).put(update_list).delete(delete_list),
        )
}

async fn get_all_lists(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ListResponse>> {
    let lists = list_service(&state).list_visible().await?;
    JsonApiResponse::ok(lists.into_iter().map(ListResponse::from).collect())
}

async fn add_list(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateListRequest>,
) -> ApiResult<i32> {
    let name = normalize_name("name", &body.name)?;
    let list = list_service(&state)
        .create_list(NewList {
            name: name.to_string(),
            description: normalize_optional(body.description),
            hidden: body.hidden,
        })
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", list.id)
}

async fn get_list_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).require_list(id).await?;
    JsonApiResponse::ok(list.into())
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateListRequest>,
) -> ApiResult<serde_json::Value> {
    let name = normalize_name("name", &body.name)?;
    list_service(&state)
        .update_list(
            id,
            ListChanges {
                name: name.to_string(),
                description: normalize_optional(body.description),
                hidden: body.hidden,
            },
        )
        .await?;
    JsonApiResponse::ok(serde_json::Value::Null)
}

async fn delete_list(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<bool> {
    list_service(&state).delete_list(id).await?;
    JsonApiResponse::ok(true)
}

impl From<list::Model> for ListResponse {
    fn from(model: list::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            hidden: model.hidden,
            start_date: model.start_date,
        }
    }
}

fn list_service(state: &AppState) -> ListService {
    state.services.list()
}
