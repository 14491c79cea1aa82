//! Saved-recipe references as they sit in user storage.
//!
//! Storage entries were written by several generations of clients, so ids can
//! be strings or numbers, cook times can be `35` or `"35 min"`, and whole
//! entries can have the wrong shape. Parsing here is lenient: anything that
//! cannot be read is skipped with a diagnostic instead of failing the caller.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::featured::parse_minutes;
use super::recipe::Difficulty;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipeRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
}

impl SavedRecipeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_cook_time(mut self, minutes: u32) -> Self {
        self.cook_time = Some(minutes);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Reads one stored entry. Returns `None` only when the entry is not an
    /// object; a missing id is kept as blank and dropped later during dedup.
    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;

        Some(Self {
            id: read_id(fields).unwrap_or_default(),
            title: read_text(fields, &["title", "name", "strMeal"]),
            category: read_text(fields, &["category", "strCategory"]),
            cook_time: read_minutes(fields),
            rating: read_rating(fields),
            difficulty: read_text(fields, &["difficulty"]).and_then(|raw| raw.parse().ok()),
            ingredients: read_ingredients(fields),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub recipes: Vec<SavedRecipeRef>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        let recipes = fields
            .get("recipes")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(SavedRecipeRef::from_value).collect())
            .unwrap_or_default();

        Some(Self {
            id: read_id(fields),
            name: read_text(fields, &["name"]).unwrap_or_default(),
            description: read_text(fields, &["description"]).unwrap_or_default(),
            category: read_text(fields, &["category"]).unwrap_or_default(),
            recipes,
        })
    }
}

/// Parses a stored favorites list. Non-array values yield an empty list.
pub fn parse_saved_list(value: &Value, source: &str) -> Vec<SavedRecipeRef> {
    let Some(entries) = value.as_array() else {
        warn!(
            event_name = "analytics.storage.malformed",
            source = source,
            expected = "array",
            "saved recipe list has unexpected shape; treating as empty"
        );
        return Vec::new();
    };

    entries.iter().filter_map(SavedRecipeRef::from_value).collect()
}

/// Parses a stored collections list. Non-array values yield an empty list.
pub fn parse_collections(value: &Value, source: &str) -> Vec<Collection> {
    let Some(entries) = value.as_array() else {
        warn!(
            event_name = "analytics.storage.malformed",
            source = source,
            expected = "array",
            "collection list has unexpected shape; treating as empty"
        );
        return Vec::new();
    };

    entries.iter().filter_map(Collection::from_value).collect()
}

fn read_id(fields: &Map<String, Value>) -> Option<String> {
    let raw = ["id", "idMeal"].iter().find_map(|key| match fields.get(*key)? {
        Value::String(text) => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })?;

    (!raw.is_empty()).then_some(raw)
}

fn read_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn read_minutes(fields: &Map<String, Value>) -> Option<u32> {
    ["cookTime", "time"].iter().find_map(|key| match fields.get(*key)? {
        Value::Number(number) => number.as_f64().filter(|m| *m >= 0.0).map(|m| m.round() as u32),
        Value::String(text) => parse_minutes(text),
        _ => None,
    })
}

fn read_rating(fields: &Map<String, Value>) -> Option<f64> {
    let rating = match fields.get("rating")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    rating.filter(|value| value.is_finite())
}

fn read_ingredients(fields: &Map<String, Value>) -> Vec<String> {
    let Some(entries) = fields.get("ingredients").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text.as_str()),
            Value::Object(item) => item.get("name").and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
