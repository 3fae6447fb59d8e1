use tracing::info;

use crate::{
    config::ListsConfig, db::dao::NewList, error::AppError, services::ServiceContext,
};

/// Creates the configured default list when no visible list exists. Returns
/// the id of the list it created, if any.
pub async fn ensure_initial_list(
    services: &ServiceContext,
    cfg: &ListsConfig,
) -> Result<Option<i32>, AppError> {
    let lists = services.list();
    if lists.count_visible().await? > 0 {
        return Ok(None);
    }

    let list = lists
        .create_list(NewList {
            name: cfg.default_name.clone(),
            description: cfg.default_description.clone(),
            hidden: false,
        })
        .await?;
    info!(list_id = list.id, "created default list");
    Ok(Some(list.id))
}
