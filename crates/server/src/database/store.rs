use async_trait::async_trait;

use crate::catalog::CatalogStore;
use crate::database::commands::{create_category, create_resource};
use crate::database::connection::DbConnection;
use crate::database::queries::{get_category, get_resource, list_categories, list_resources};
use crate::error::StoreError;
use crate::models::category::{CategoryId, CreateCategoryRequest, ResourceCategory};
use crate::models::resource::{NewResource, ResourceId, ResourceRow};

#[async_trait]
impl CatalogStore for DbConnection {
    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, StoreError> {
        Ok(list_categories(self.pool()).await?)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<ResourceCategory>, StoreError> {
        Ok(get_category(self.pool(), id).await?)
    }

    async fn insert_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<ResourceCategory, StoreError> {
        Ok(create_category(self.pool(), request).await?)
    }

    async fn list_resource_rows(&self) -> Result<Vec<ResourceRow>, StoreError> {
        Ok(list_resources(self.pool()).await?)
    }

    async fn get_resource_row(&self, id: ResourceId) -> Result<Option<ResourceRow>, StoreError> {
        Ok(get_resource(self.pool(), id).await?)
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceRow, StoreError> {
        Ok(create_resource(self.pool(), resource).await?)
    }
}
