use serde_json::{json, Value};
use tracing::{info, warn};

use sufra_core::domain::profile::DemoProfile;
use sufra_core::domain::saved::SavedRecipeRef;
use sufra_core::storage::{KeyValueStore, StorageError, StorageKey};

/// Write side of the saved-recipe keys.
///
/// Entries are edited as raw JSON so fields written by other clients survive
/// a round trip. A stored value that is not a JSON array is replaced.
pub struct SavedRecipeWriter<S> {
    store: S,
}

impl<S> SavedRecipeWriter<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns `false` when the recipe is already a favorite.
    pub async fn add_favorite(
        &self,
        user_id: &str,
        recipe: &SavedRecipeRef,
    ) -> Result<bool, StorageError> {
        let key = StorageKey::favorites(user_id);
        let mut favorites = self.read_array(&key).await?;
        if favorites.iter().any(|entry| has_id(entry, &recipe.id)) {
            return Ok(false);
        }

        favorites.push(encode(recipe)?);
        self.write_array(&key, favorites).await?;
        info!(
            event_name = "saved_recipes.favorite.added",
            user_id = user_id,
            recipe_id = %recipe.id,
            "favorite saved"
        );
        Ok(true)
    }

    /// Returns `false` when the recipe was not a favorite.
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<bool, StorageError> {
        let key = StorageKey::favorites(user_id);
        let mut favorites = self.read_array(&key).await?;
        let before = favorites.len();
        favorites.retain(|entry| !has_id(entry, recipe_id));
        if favorites.len() == before {
            return Ok(false);
        }

        self.write_array(&key, favorites).await?;
        info!(
            event_name = "saved_recipes.favorite.removed",
            user_id = user_id,
            recipe_id = recipe_id,
            "favorite removed"
        );
        Ok(true)
    }

    /// Adds the recipe to the named collection, creating the collection on
    /// first use. Returns `false` when the recipe is already in it.
    pub async fn add_to_collection(
        &self,
        user_id: &str,
        collection_name: &str,
        recipe: &SavedRecipeRef,
    ) -> Result<bool, StorageError> {
        let name = collection_name.trim();
        if name.is_empty() {
            return Err(StorageError::Encode("collection name must not be empty".to_owned()));
        }

        let key = StorageKey::collections(user_id);
        let mut collections = self.read_array(&key).await?;
        let index = match collections
            .iter()
            .position(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        {
            Some(index) => index,
            None => {
                collections.push(json!({ "id": collection_id(name), "name": name, "recipes": [] }));
                collections.len() - 1
            }
        };

        let Some(collection) = collections[index].as_object_mut() else {
            return Err(StorageError::Encode(format!("collection `{name}` is not an object")));
        };
        let mut recipes =
            collection.get("recipes").and_then(Value::as_array).cloned().unwrap_or_default();
        if recipes.iter().any(|entry| has_id(entry, &recipe.id)) {
            return Ok(false);
        }
        recipes.push(encode(recipe)?);
        collection.insert("recipes".to_owned(), Value::Array(recipes));

        self.write_array(&key, collections).await?;
        info!(
            event_name = "saved_recipes.collection.added",
            user_id = user_id,
            collection = name,
            recipe_id = %recipe.id,
            "recipe added to collection"
        );
        Ok(true)
    }

    pub async fn save_demo_profile(&self, profile: &DemoProfile) -> Result<(), StorageError> {
        self.store.put(StorageKey::DEMO_USER, profile.document().to_string()).await
    }

    pub async fn clear_user(&self, user_id: &str) -> Result<(), StorageError> {
        self.store.delete(&StorageKey::favorites(user_id)).await?;
        self.store.delete(&StorageKey::collections(user_id)).await
    }

    async fn read_array(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                warn!(
                    event_name = "analytics.storage.malformed",
                    source = key,
                    "stored entry is not a json array; it will be replaced"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_array(&self, key: &str, entries: Vec<Value>) -> Result<(), StorageError> {
        self.store.put(key, Value::Array(entries).to_string()).await
    }
}

fn encode(recipe: &SavedRecipeRef) -> Result<Value, StorageError> {
    serde_json::to_value(recipe).map_err(|error| StorageError::Encode(error.to_string()))
}

fn has_id(entry: &Value, recipe_id: &str) -> bool {
    SavedRecipeRef::from_value(entry).is_some_and(|saved| saved.id == recipe_id)
}

fn collection_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect();
    format!("collection-{slug}")
}
