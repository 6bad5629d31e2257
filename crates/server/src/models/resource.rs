use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::format::format_file_size;
use crate::models::category::{CategoryId, ResourceCategory};

pub type ResourceId = Uuid;

pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// Row as kept by the metadata store, before the category join.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ResourceRow {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub tags: Vec<String>,
    pub is_pack: bool,
    pub pack_size: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub tags: Vec<String>,
    pub is_pack: bool,
    pub pack_size: i32,
}

/// A row joined with the category it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(flatten)]
    pub row: ResourceRow,
    pub category: ResourceCategory,
    /// `file_size` as shown to people, e.g. `1.5 KB`.
    pub file_size_label: String,
}

impl Resource {
    pub fn new(row: ResourceRow, category: ResourceCategory) -> Self {
        let file_size_label = format_file_size(u64::try_from(row.file_size).unwrap_or(0));
        Self {
            row,
            category,
            file_size_label,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes,
        }
    }

    pub fn file_type(&self) -> &str {
        self.content_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_FILE_TYPE)
    }
}

#[derive(Clone, Debug)]
pub struct Download {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
