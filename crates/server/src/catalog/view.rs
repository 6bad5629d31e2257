use serde::Serialize;
use strum_macros::Display;
use tracing::error;

use crate::catalog::search::{search, ResourceFilter, SearchView};
use crate::catalog::service::ResourceCatalog;
use crate::models::category::ResourceCategory;
use crate::models::resource::Resource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short user-facing message produced by a catalog operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    #[serde(flatten)]
    pub category: ResourceCategory,
    pub resource_count: usize,
}

/// Snapshot of what a catalog screen shows. Loading falls back to empty lists with notices.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CatalogView {
    pub categories: Vec<ResourceCategory>,
    pub resources: Vec<Resource>,
    pub notices: Vec<Notice>,
}

impl CatalogView {
    pub async fn load(catalog: &ResourceCatalog) -> Self {
        let (categories, resources) =
            futures::join!(catalog.list_categories(), catalog.list_resources());
        let mut view = Self::default();
        match categories {
            Ok(categories) => view.categories = categories,
            Err(e) => {
                error!("failed to load categories: {e}");
                view.notices.push(Notice::error("Failed to load categories"));
            }
        }
        match resources {
            Ok(resources) => view.resources = resources,
            Err(e) => {
                error!("failed to load resources: {e}");
                view.notices.push(Notice::error("Failed to load resources"));
            }
        }
        view
    }

    pub fn filtered<'a>(&'a self, filter: &'a ResourceFilter) -> SearchView<'a> {
        search(&self.resources, filter)
    }

    pub fn overview(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|category| CategorySummary {
                category: category.clone(),
                resource_count: self
                    .resources
                    .iter()
                    .filter(|r| r.row.category_id == category.id)
                    .count(),
            })
            .collect()
    }
}
