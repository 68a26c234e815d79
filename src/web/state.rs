use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::storage_service::StorageService;
use crate::web::middleware::session::BrowserSession;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn storage_for(&self, session: &BrowserSession) -> StorageService {
        StorageService::new(self.pool.clone(), session.id.clone())
    }
}
