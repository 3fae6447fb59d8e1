use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers;
use crate::config::DatabaseConfig;

/// Opens the pool through the provider matching the URL scheme and creates
/// any missing tables from the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = providers::default_registry()?.provider_for_url(&cfg.url)?;
    let db = provider.connect(cfg).await?;
    provider.prepare(&db, cfg).await?;

    info!(
        provider = provider.id().as_str(),
        "syncing database schema from entities"
    );
    db.get_schema_registry("todo_desk::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
