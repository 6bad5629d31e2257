use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::memory::MemoryCatalogStore;
use crate::catalog::service::ResourceCatalog;
use crate::catalog::CatalogStore;
use crate::config::{AppConfig, BlobBackend};
use crate::database::connection::DbConnection;
use crate::storage::fs::FsBlobStore;
use crate::storage::memory::MemoryBlobStore;
use crate::storage::BlobStore;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: ResourceCatalog,
}

impl AppState {
    pub async fn try_init(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn CatalogStore> = match &config.database {
            Some(database) => {
                let db_connection = DbConnection::connect(database).await?;
                db_connection.ensure_schema().await?;
                Arc::new(db_connection)
            }
            None => {
                warn!("no database configured, resource metadata is kept in memory only");
                Arc::new(MemoryCatalogStore::seeded().await?)
            }
        };
        let blobs: Arc<dyn BlobStore> = match &config.storage.backend {
            BlobBackend::Fs { root } => {
                info!("storing resource files under {root:?}");
                Arc::new(FsBlobStore::new(root))
            }
            BlobBackend::Memory => {
                warn!("resource files are kept in memory only");
                Arc::new(MemoryBlobStore::new())
            }
        };
        Ok(Self::new(
            config.clone(),
            ResourceCatalog::new(store, blobs, config.storage.on_error),
        ))
    }

    pub fn new(config: AppConfig, catalog: ResourceCatalog) -> Self {
        Self { config, catalog }
    }
}
