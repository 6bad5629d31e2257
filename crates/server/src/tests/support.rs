use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::memory::MemoryCatalogStore;
use crate::catalog::service::ResourceCatalog;
use crate::catalog::CatalogStore;
use crate::config::UploadErrorPolicy;
use crate::error::StoreError;
use crate::models::category::{CategoryId, CreateCategoryRequest, ResourceCategory};
use crate::models::resource::{NewResource, ResourceId, ResourceRow, UploadFile};
use crate::storage::memory::MemoryBlobStore;
use crate::storage::BlobStore;

fn injected_failure() -> StoreError {
    StoreError::Io(std::io::Error::other("injected failure"))
}

/// Counts calls and fails the n-th (1-based) insert or store when asked to.
#[derive(Default)]
pub struct Faults {
    pub calls: AtomicUsize,
    pub fail_on: Option<usize>,
    pub fail_all: bool,
}

impl Faults {
    fn hit(&self) -> Result<(), StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_all || self.fail_on == Some(call) {
            return Err(injected_failure());
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct FaultyCatalogStore {
    pub inner: MemoryCatalogStore,
    pub reads: Faults,
    pub inserts: Faults,
}

#[async_trait]
impl CatalogStore for FaultyCatalogStore {
    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, StoreError> {
        self.reads.hit()?;
        self.inner.list_categories().await
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<ResourceCategory>, StoreError> {
        self.reads.hit()?;
        self.inner.get_category(id).await
    }

    async fn insert_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<ResourceCategory, StoreError> {
        self.inner.insert_category(request).await
    }

    async fn list_resource_rows(&self) -> Result<Vec<ResourceRow>, StoreError> {
        self.reads.hit()?;
        self.inner.list_resource_rows().await
    }

    async fn get_resource_row(&self, id: ResourceId) -> Result<Option<ResourceRow>, StoreError> {
        self.reads.hit()?;
        self.inner.get_resource_row(id).await
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceRow, StoreError> {
        self.inserts.hit()?;
        self.inner.insert_resource(resource).await
    }
}

pub struct FaultyBlobStore {
    pub inner: MemoryBlobStore,
    pub stores: Faults,
}

#[async_trait]
impl BlobStore for FaultyBlobStore {
    async fn store(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.stores.hit()?;
        self.inner.store(bucket, key, bytes).await
    }

    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.inner.fetch(bucket, key).await
    }
}

pub struct Fixture {
    pub catalog: ResourceCatalog,
    pub store: Arc<FaultyCatalogStore>,
    pub blobs: Arc<FaultyBlobStore>,
    pub categories: Vec<ResourceCategory>,
}

impl Fixture {
    pub async fn new(policy: UploadErrorPolicy) -> Self {
        Self::with_faults(policy, Faults::default(), Faults::default(), Faults::default()).await
    }

    pub async fn with_faults(
        policy: UploadErrorPolicy,
        reads: Faults,
        inserts: Faults,
        stores: Faults,
    ) -> Self {
        let _ = tracing_subscriber::fmt::try_init();

        let inner = MemoryCatalogStore::seeded().await.unwrap();
        let categories = inner.list_categories().await.unwrap();
        let store = Arc::new(FaultyCatalogStore {
            inner,
            reads,
            inserts,
        });
        let blobs = Arc::new(FaultyBlobStore {
            inner: MemoryBlobStore::new(),
            stores,
        });
        let catalog = ResourceCatalog::new(store.clone(), blobs.clone(), policy);
        Self {
            catalog,
            store,
            blobs,
            categories,
        }
    }

    pub fn category(&self, name: &str) -> &ResourceCategory {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no seeded category named {name}"))
    }
}

pub fn pdf(name: &str, len: usize) -> UploadFile {
    UploadFile::new(name, Some("application/pdf"), vec![b'x'; len])
}
