use std::sync::Arc;

use crate::config::{Config, DatabaseUrlSource};
use crate::db::{RepositoryConnector, TrackRepository};
use crate::error::{AppError, Result};
use crate::storage::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database_url_source: DatabaseUrlSource,
    pub connector: Arc<dyn RepositoryConnector>,
    pub object_store: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        database_url_source: DatabaseUrlSource,
        connector: Arc<dyn RepositoryConnector>,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            database_url_source,
            connector,
            object_store,
        }
    }

    /// Resolve the connection string for this request.
    pub fn database_url(&self) -> Result<String> {
        self.database_url_source
            .resolve()
            .ok_or_else(AppError::configuration_missing)
    }

    pub async fn connect(&self, database_url: &str) -> Result<Box<dyn TrackRepository>> {
        self.connector.connect(database_url).await
    }
}
