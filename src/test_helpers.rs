//! Builders for tests that need a real, empty store.

use std::{path::Path, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    services::ServiceContext,
    state::AppState,
};

/// A single-connection in-memory SQLite config. Each pool gets its own
/// database, so one connection keeps every query on the same data.
pub fn memory_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
        },
        ..AppConfig::default()
    }
}

pub async fn memory_db() -> DatabaseConnection {
    connection::connect(&memory_config().database)
        .await
        .expect("in-memory sqlite should open")
}

pub async fn memory_services() -> ServiceContext {
    ServiceContext::new(&memory_db().await)
}

pub async fn memory_state() -> Arc<AppState> {
    AppState::new(memory_config(), &memory_db().await)
}

/// A file-backed SQLite store with the default pool size, for tests that
/// need several connections writing at once.
pub fn file_config(path: &Path) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            ..DatabaseConfig::default()
        },
        ..AppConfig::default()
    }
}

pub async fn file_db(path: &Path) -> DatabaseConnection {
    connection::connect(&file_config(path).database)
        .await
        .expect("file-backed sqlite should open")
}
