use async_trait::async_trait;
use chrono::Utc;

use sufra_core::storage::{KeyValueStore, StorageError};

use super::RepositoryError;
use crate::DbPool;

pub struct SqlKeyValueStore {
    pool: DbPool,
}

impl SqlKeyValueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Keys starting with `prefix`, in key order.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, RepositoryError> {
        let pattern = format!("{}%", escape_like(prefix));
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT key FROM kv_store WHERE key LIKE ?1 ESCAPE '\\' ORDER BY key",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(keys)
    }

    async fn fetch(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1").bind(key).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.fetch(key).await?)
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        Ok(self.upsert(key, &value).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        Ok(self.remove(key).await?)
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
