use std::collections::HashMap;

use async_trait::async_trait;
use crate::error::StoreError;
use crate::models::category::{CategoryId, CreateCategoryRequest, ResourceCategory};
use crate::models::resource::{NewResource, Resource, ResourceId, ResourceRow};

pub mod format;
pub mod memory;
pub mod search;
pub mod service;
pub mod upload;
pub mod view;

/// Relational side of the catalog: category reference data and resource rows.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, StoreError>;
    async fn get_category(&self, id: CategoryId) -> Result<Option<ResourceCategory>, StoreError>;
    async fn insert_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<ResourceCategory, StoreError>;
    /// Rows ordered by creation time, newest first.
    async fn list_resource_rows(&self) -> Result<Vec<ResourceRow>, StoreError>;
    async fn get_resource_row(&self, id: ResourceId) -> Result<Option<ResourceRow>, StoreError>;
    async fn insert_resource(&self, resource: &NewResource) -> Result<ResourceRow, StoreError>;
}

/// Result of joining rows onto categories. Rows whose category is unknown end up in `orphans`.
#[derive(Debug, Default)]
pub struct JoinedResources {
    pub resources: Vec<Resource>,
    pub orphans: Vec<ResourceRow>,
}

pub fn join_with_categories(
    rows: Vec<ResourceRow>,
    categories: &[ResourceCategory],
) -> JoinedResources {
    let by_id: HashMap<CategoryId, &ResourceCategory> =
        categories.iter().map(|c| (c.id, c)).collect();
    let mut joined = JoinedResources::default();
    for row in rows {
        match by_id.get(&row.category_id) {
            Some(category) => joined
                .resources
                .push(Resource::new(row, (*category).clone())),
            None => joined.orphans.push(row),
        }
    }
    joined
}
