use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;
use crate::storage::{validate_key, BlobStore};

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<(String, String), Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryBlobStore {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .contains_key(&(bucket.to_string(), key.to_string()))
    }

    pub fn remove(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .remove(&(bucket.to_string(), key.to_string()))
            .map(|(_, bytes)| bytes)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        self.objects
            .insert((bucket.to_string(), key.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        validate_key(key)?;
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}
