use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::error::StoreError;
use crate::models::category::{default_categories, CategoryId, CreateCategoryRequest, ResourceCategory};
use crate::models::resource::{NewResource, ResourceId, ResourceRow};

/// Metadata store kept in process memory, for running without a database.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    categories: RwLock<Vec<ResourceCategory>>,
    resources: RwLock<Vec<ResourceRow>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seeded() -> Result<Self, StoreError> {
        let store = Self::new();
        for category in default_categories() {
            store.insert_category(&category).await?;
        }
        Ok(store)
    }
}

#[cfg(test)]
impl MemoryCatalogStore {
    pub async fn resource_count(&self) -> usize {
        self.resources.read().await.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, StoreError> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<ResourceCategory>, StoreError> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<ResourceCategory, StoreError> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.name == request.name) {
            return Err(StoreError::Corrupt(format!(
                "category `{}` already exists",
                request.name
            )));
        }
        let category = ResourceCategory {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            description: request.description.clone(),
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn list_resource_rows(&self) -> Result<Vec<ResourceRow>, StoreError> {
        // newest inserts first, so equal timestamps keep reverse insertion order
        let mut rows: Vec<ResourceRow> = self.resources.read().await.iter().rev().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_resource_row(&self, id: ResourceId) -> Result<Option<ResourceRow>, StoreError> {
        Ok(self
            .resources
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceRow, StoreError> {
        if self.get_category(resource.category_id).await?.is_none() {
            return Err(StoreError::Corrupt(format!(
                "resource references unknown category {}",
                resource.category_id
            )));
        }
        let row = ResourceRow {
            id: Uuid::new_v4(),
            title: resource.title.clone(),
            description: resource.description.clone(),
            category_id: resource.category_id,
            file_path: resource.file_path.clone(),
            file_name: resource.file_name.clone(),
            file_size: resource.file_size,
            file_type: resource.file_type.clone(),
            tags: resource.tags.clone(),
            is_pack: resource.is_pack,
            pack_size: resource.pack_size,
            created_at: Utc::now(),
        };
        self.resources.write().await.push(row.clone());
        Ok(row)
    }
}
