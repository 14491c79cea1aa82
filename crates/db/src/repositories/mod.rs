use thiserror::Error;

use sufra_core::storage::StorageError;

pub mod key_value;
pub mod memory;
pub mod saved_recipes;

pub use key_value::SqlKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use saved_recipes::SavedRecipeWriter;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<RepositoryError> for StorageError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Database(error) => StorageError::Backend(error.to_string()),
        }
    }
}
