use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sufra_core::storage::{KeyValueStore, StorageError};

/// Process-local store backing unit tests and the server router tests.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self { entries: RwLock::new(entries) }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sufra_core::storage::{KeyValueStore, StorageKey};

    use crate::repositories::InMemoryKeyValueStore;

    #[tokio::test]
    async fn put_overwrites_and_delete_removes() {
        let store = InMemoryKeyValueStore::default();
        let key = StorageKey::favorites("u1");

        store.put(&key, "[]".to_owned()).await.expect("put");
        store.put(&key, "[{\"id\":\"1\"}]".to_owned()).await.expect("overwrite");
        assert_eq!(store.get(&key).await.expect("get").as_deref(), Some("[{\"id\":\"1\"}]"));

        store.delete(&key).await.expect("delete");
        assert_eq!(store.get(&key).await.expect("get after delete"), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn deleting_a_missing_key_is_not_an_error() {
        let store = InMemoryKeyValueStore::from_entries([("demoUser", "{}")]);

        store.delete("favorites_nobody").await.expect("delete missing key");

        assert_eq!(store.len().await, 1);
    }
}
