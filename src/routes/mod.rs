use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

pub mod lists;
pub mod memberships;
pub mod tasks;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(lists::router())
        .merge(tasks::router())
        .merge(memberships::router())
        .with_state(state);
    Router::new().nest(API_PREFIX, api)
}

/// The router with the error-envelope, panic and tracing layers the server
/// runs with.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}

/// Trims a required name; blank names are rejected.
pub(crate) fn normalize_name<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{field} required")));
    }
    Ok(trimmed)
}

/// Trims optional text; blank values count as absent.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
