use async_trait::async_trait;

use crate::error::StoreError;

pub mod fs;
pub mod memory;

/// Object store for resource bytes, addressed by bucket and `/`-separated key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;
}

/// Rejects keys that could escape their bucket once mapped onto a path.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_keys() {
        validate_key("5c1d/1700000000000-abc.pdf").unwrap();
        validate_key("plain").unwrap();
    }

    #[test]
    fn rejects_escaping_keys() {
        for key in ["", "/abs", "a/../b", "a//b", "./a", "a\\b", "a/"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
