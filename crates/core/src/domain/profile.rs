use serde_json::{json, Value};
use tracing::warn;

use super::saved::{parse_collections, parse_saved_list, Collection, SavedRecipeRef};

/// The shared demo account blob stored under the `demoUser` key.
///
/// The document also carries unrelated demo state (meal plans, shopping
/// lists); it is kept intact so writers can round-trip it, while favorites and
/// collections are parsed once on construction.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoProfile {
    document: Value,
    favorites: Vec<SavedRecipeRef>,
    collections: Vec<Collection>,
}

impl Default for DemoProfile {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl DemoProfile {
    pub fn new(favorites: Vec<SavedRecipeRef>, collections: Vec<Collection>) -> Self {
        let document = json!({
            "name": "Demo Cook",
            "isDemo": true,
            "demoData": {
                "favorites": favorites,
                "collections": collections,
            },
        });

        Self { document, favorites, collections }
    }

    /// Parses the raw stored string. Unparsable input yields an empty profile.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(document) => Self::from_value(document),
            Err(error) => {
                warn!(
                    event_name = "analytics.storage.malformed",
                    source = "demoUser",
                    error = %error,
                    "demo profile is not valid json; treating as empty"
                );
                Self::default()
            }
        }
    }

    pub fn from_value(document: Value) -> Self {
        let demo_data = document.get("demoData");
        let favorites = demo_data
            .and_then(|data| data.get("favorites"))
            .map(|value| parse_saved_list(value, "demoUser.demoData.favorites"))
            .unwrap_or_default();
        let collections = demo_data
            .and_then(|data| data.get("collections"))
            .map(|value| parse_collections(value, "demoUser.demoData.collections"))
            .unwrap_or_default();

        Self { document, favorites, collections }
    }

    pub fn favorites(&self) -> &[SavedRecipeRef] {
        &self.favorites
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}
