use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(String),
    #[error("could not encode stored value: {0}")]
    Encode(String),
}

/// Raw string key-value storage holding JSON documents per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T> KeyValueStore for Arc<T>
where
    T: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key).await
    }
}

#[async_trait]
impl<T> KeyValueStore for &T
where
    T: KeyValueStore + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key).await
    }
}

/// Storage key layout shared with the web client.
pub struct StorageKey;

impl StorageKey {
    pub const DEMO_USER: &'static str = "demoUser";

    pub fn favorites(user_id: &str) -> String {
        format!("favorites_{user_id}")
    }

    pub fn collections(user_id: &str) -> String {
        format!("collections_{user_id}")
    }
}
