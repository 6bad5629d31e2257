use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::database::connection::DbConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    #[serde(default = "ServerConfig::default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    const MAX_BODY_FALLBACK: usize = 50 * 1024 * 1024;

    fn default_max_body_bytes() -> usize {
        Self::MAX_BODY_FALLBACK
    }
}

/// What happens to the rest of an upload batch once one file fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadErrorPolicy {
    /// Stop at the first failure and skip the remaining files.
    #[default]
    Abort,
    /// Attempt every file and report each outcome.
    Continue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlobBackend {
    Fs { root: PathBuf },
    Memory,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(flatten)]
    pub backend: BlobBackend,
    #[serde(default)]
    pub on_error: UploadErrorPolicy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// Without a database the catalog keeps its rows in memory.
    #[serde(default)]
    pub database: Option<DbConfig>,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_yaml_file<P: Into<PathBuf>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.into();
        let content = read_to_string(&path).with_context(|| format!("path: {path:?}"))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, anyhow::Error> {
        Ok(serde_yaml::from_str(content)?)
    }
}
