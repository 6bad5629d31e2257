use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::catalog::upload::{
    generate_storage_key, new_resource_for, storage_path, InFlightUploads, UploadOutcome,
    UploadReport, UploadStage,
};
use crate::catalog::{join_with_categories, CatalogStore};
use crate::config::UploadErrorPolicy;
use crate::error::{RequestError, StoreError, ValidationError};
use crate::models::category::{CategoryFilter, CategoryId, ResourceCategory};
use crate::models::resource::{Download, Resource, ResourceId, UploadFile};
use crate::server::constants::{MAX_FILES_PER_BATCH, RESOURCES_BUCKET};
use crate::storage::BlobStore;

#[derive(Clone)]
pub struct ResourceCatalog {
    store: Arc<dyn CatalogStore>,
    blobs: Arc<dyn BlobStore>,
    policy: UploadErrorPolicy,
    in_flight: InFlightUploads,
}

impl ResourceCatalog {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        blobs: Arc<dyn BlobStore>,
        policy: UploadErrorPolicy,
    ) -> Self {
        Self {
            store,
            blobs,
            policy,
            in_flight: InFlightUploads::default(),
        }
    }

    /// File names currently being uploaded, across all batches.
    pub fn in_flight(&self) -> Vec<String> {
        self.in_flight.snapshot()
    }

    pub async fn list_categories(&self) -> Result<Vec<ResourceCategory>, StoreError> {
        self.store.list_categories().await
    }

    /// Newest first, each joined with its category. Rows with an unknown category are left out.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, StoreError> {
        let categories = self.store.list_categories().await?;
        let rows = self.store.list_resource_rows().await?;
        let joined = join_with_categories(rows, &categories);
        for orphan in &joined.orphans {
            warn!(
                "resource {} references unknown category {}, excluding it",
                orphan.id, orphan.category_id
            );
        }
        Ok(joined.resources)
    }

    #[instrument(skip_all, fields(files = files.len()))]
    pub async fn upload(
        &self,
        files: Vec<UploadFile>,
        category: Option<CategoryFilter>,
    ) -> Result<UploadReport, RequestError> {
        let category_id = category
            .and_then(|c| c.selected())
            .ok_or(ValidationError::MissingCategory)?;
        if files.is_empty() {
            return Err(ValidationError::InvalidInput {
                value: "files".to_string(),
                reason: "at least one file is required".to_string(),
            }
            .into());
        }
        if let Some(file) = files.iter().find(|f| f.file_name.is_empty()) {
            return Err(ValidationError::InvalidInput {
                value: format!("{} byte file", file.bytes.len()),
                reason: "file name is required".to_string(),
            }
            .into());
        }
        if files.len() > MAX_FILES_PER_BATCH {
            return Err(ValidationError::LimitExceeded {
                subject: "upload batch".to_string(),
                unit: "file".to_string(),
                attempted: files.len(),
                limit: MAX_FILES_PER_BATCH,
            }
            .into());
        }
        if self.store.get_category(category_id).await?.is_none() {
            return Err(ValidationError::NotFound.into());
        }

        let _in_flight = self
            .in_flight
            .track(files.iter().map(|f| f.file_name.as_str()));
        let mut outcomes = Vec::with_capacity(files.len());
        let mut files = files.into_iter();
        while let Some(file) = files.next() {
            let outcome = self.upload_one(&file, category_id).await;
            let failed = !outcome.is_uploaded();
            outcomes.push(outcome);
            if failed && self.policy == UploadErrorPolicy::Abort {
                if let Some(outcome) = outcomes.last() {
                    warn!("`{}` failed, skipping the rest of the batch", outcome.file_name());
                }
                outcomes.extend(files.by_ref().map(|f| UploadOutcome::Skipped {
                    file_name: f.file_name,
                }));
                break;
            }
        }

        let mut report = UploadReport::new(outcomes);
        info!(
            "uploaded {} of {} file(s) into category {category_id}",
            report.uploaded_count(),
            report.outcomes.len()
        );
        if report.uploaded_count() > 0 {
            match self.list_resources().await {
                Ok(resources) => report.refreshed = Some(resources),
                Err(e) => warn!("failed to refresh resources after upload: {e}"),
            }
        }
        Ok(report)
    }

    async fn upload_one(&self, file: &UploadFile, category_id: CategoryId) -> UploadOutcome {
        let file_path = storage_path(&category_id, &generate_storage_key(&file.file_name));
        debug!("storing `{}` at {file_path}", file.file_name);
        if let Err(e) = self
            .blobs
            .store(RESOURCES_BUCKET, &file_path, &file.bytes)
            .await
        {
            error!("failed to store `{}`: {e}", file.file_name);
            return UploadOutcome::Failed {
                file_name: file.file_name.clone(),
                stage: UploadStage::Blob,
                error: "failed to store file".to_string(),
                orphaned_blob: None,
            };
        }
        let new_resource = new_resource_for(file, category_id, file_path.clone());
        match self.store.insert_resource(&new_resource).await {
            Ok(resource) => UploadOutcome::Uploaded { resource },
            Err(e) => {
                error!(
                    "failed to record `{}`, blob {file_path} is left without metadata: {e}",
                    file.file_name
                );
                UploadOutcome::Failed {
                    file_name: file.file_name.clone(),
                    stage: UploadStage::Metadata,
                    error: "failed to record file metadata".to_string(),
                    orphaned_blob: Some(file_path),
                }
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn download(&self, id: ResourceId) -> Result<Download, RequestError> {
        let row = self
            .store
            .get_resource_row(id)
            .await?
            .ok_or(ValidationError::NotFound)?;
        let bytes = self.blobs.fetch(RESOURCES_BUCKET, &row.file_path).await?;
        info!("downloaded `{}` ({} bytes)", row.file_name, bytes.len());
        Ok(Download {
            file_name: row.file_name,
            content_type: row.file_type,
            bytes,
        })
    }
}
