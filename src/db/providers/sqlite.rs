use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use super::registry::{DbProvider, DbProviderId};
use crate::config::DatabaseConfig;

pub struct SqliteDbProvider;

#[async_trait]
impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["sqlite"]
    }

    async fn prepare(&self, db: &DatabaseConnection, cfg: &DatabaseConfig) -> Result<()> {
        if is_in_memory(&cfg.url) {
            return Ok(());
        }
        // journal mode is stored in the file, so it holds for every pooled connection
        db.execute_unprepared("PRAGMA journal_mode = WAL").await?;
        debug!("sqlite journal mode set to WAL");
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:todo?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://todo.db?mode=rwc"));
    }
}
