use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Third-party meal payloads carry at most this many numbered ingredient slots.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Display order used by every difficulty breakdown.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::InvalidDifficulty(other.to_owned())),
        }
    }
}

/// Normalized recipe record handed to the halal classifier.
///
/// Every field may be empty. Payloads from the recipe search API arrive with
/// numbered ingredient slots and are adapted through [`Recipe::from_meal_record`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Adapts a raw meal payload into the normalized shape.
    ///
    /// Accepts both the snake-case slot naming (`ingredient_1`) and the search
    /// API naming (`strIngredient1`). Only slots `1..=20` are read; blank slots
    /// are skipped. Returns `None` when the payload is not a JSON object.
    pub fn from_meal_record(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;

        let ingredients = (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let snake = format!("ingredient_{slot}");
                let api = format!("strIngredient{slot}");
                first_text(fields, &[snake.as_str(), api.as_str()])
            })
            .collect();

        Some(Self {
            name: first_text(fields, &["name", "title", "strMeal"]).unwrap_or_default(),
            category: first_text(fields, &["category", "strCategory"]).unwrap_or_default(),
            area: first_text(fields, &["area", "cuisine", "strArea"]).unwrap_or_default(),
            instructions: first_text(fields, &["instructions", "strInstructions"])
                .unwrap_or_default(),
            ingredients,
        })
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}
