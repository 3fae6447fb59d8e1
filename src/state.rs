use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::ServiceContext};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: ServiceContext,
}

impl AppState {
    pub fn new(config: AppConfig, db: &DatabaseConnection) -> Arc<Self> {
        Arc::new(Self {
            config,
            services: ServiceContext::new(db),
        })
    }
}
