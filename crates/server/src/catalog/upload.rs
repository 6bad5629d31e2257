use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rand::Rng;
use serde::Serialize;
use strum_macros::Display;

use crate::catalog::view::Notice;
use crate::models::category::CategoryId;
use crate::models::resource::{NewResource, Resource, ResourceRow, UploadFile};

const KEY_SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const KEY_SUFFIX_LENGTH: usize = 11;

/// Splits `name` at its last extension, the way `report.final.pdf` → (`report.final`, `pdf`).
fn split_extension(file_name: &str) -> Option<(&str, &str)> {
    file_name
        .rsplit_once('.')
        .filter(|(_, ext)| !ext.is_empty() && !ext.contains('/'))
}

pub fn title_from_file_name(file_name: &str) -> String {
    match split_extension(file_name) {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// `{unix_millis}-{random base36}[.{ext}]`, with the extension reduced to ASCII alphanumerics.
pub fn generate_storage_key(file_name: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..KEY_SUFFIX_LENGTH)
        .map(|_| KEY_SUFFIX_ALPHABET[rng.gen_range(0..KEY_SUFFIX_ALPHABET.len())] as char)
        .collect();
    let extension: String = split_extension(file_name)
        .map(|(_, ext)| ext.chars().filter(char::is_ascii_alphanumeric).collect())
        .unwrap_or_default();
    let millis = Utc::now().timestamp_millis();
    if extension.is_empty() {
        format!("{millis}-{suffix}")
    } else {
        format!("{millis}-{suffix}.{}", extension.to_ascii_lowercase())
    }
}

pub fn storage_path(category_id: &CategoryId, key: &str) -> String {
    format!("{category_id}/{key}")
}

pub fn new_resource_for(file: &UploadFile, category_id: CategoryId, file_path: String) -> NewResource {
    NewResource {
        title: title_from_file_name(&file.file_name),
        description: format!("Uploaded resource: {}", file.file_name),
        category_id,
        file_path,
        file_name: file.file_name.clone(),
        file_size: file.bytes.len() as i64,
        file_type: file.file_type().to_string(),
        tags: Vec::new(),
        is_pack: false,
        pack_size: 1,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UploadStage {
    Blob,
    Metadata,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Uploaded {
        resource: ResourceRow,
    },
    Failed {
        file_name: String,
        stage: UploadStage,
        error: String,
        /// Path of bytes that were stored without a metadata row.
        orphaned_blob: Option<String>,
    },
    Skipped {
        file_name: String,
    },
}

impl UploadOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Uploaded { resource } => &resource.file_name,
            Self::Failed { file_name, .. } | Self::Skipped { file_name } => file_name,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
    pub notice: Notice,
    /// Resource list fetched again after anything was uploaded.
    pub refreshed: Option<Vec<Resource>>,
}

impl UploadReport {
    pub fn new(outcomes: Vec<UploadOutcome>) -> Self {
        let mut report = Self {
            outcomes,
            notice: Notice::error("Failed to upload files"),
            refreshed: None,
        };
        if report.is_complete() {
            report.notice = Notice::success(format!(
                "Uploaded {} file(s) successfully",
                report.outcomes.len()
            ));
        }
        report
    }

    pub fn uploaded(&self) -> impl Iterator<Item = &ResourceRow> {
        self.outcomes.iter().filter_map(|o| match o {
            UploadOutcome::Uploaded { resource } => Some(resource),
            _ => None,
        })
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploaded().count()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(UploadOutcome::is_uploaded)
    }
}

/// Multiset of file names with an upload in progress, shared across batches.
#[derive(Clone, Debug, Default)]
pub struct InFlightUploads {
    names: Arc<DashMap<String, usize>>,
}

impl InFlightUploads {
    pub fn track<'a, I>(&self, file_names: I) -> InFlightGuard
    where
        I: IntoIterator<Item = &'a str>,
    {
        let file_names: Vec<String> = file_names.into_iter().map(str::to_string).collect();
        for name in &file_names {
            *self.names.entry(name.clone()).or_insert(0) += 1;
        }
        InFlightGuard {
            names: Arc::clone(&self.names),
            file_names,
        }
    }

    pub fn snapshot(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .names
            .iter()
            .flat_map(|entry| std::iter::repeat(entry.key().clone()).take(*entry.value()))
            .collect();
        names.sort();
        names
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Releases its file names from the in-flight set on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    names: Arc<DashMap<String, usize>>,
    file_names: Vec<String>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        for name in &self.file_names {
            self.names.remove_if_mut(name, |_, count| {
                *count -= 1;
                *count == 0
            });
        }
    }
}
