use serde::{Deserialize, Serialize};

use super::recipe::{Difficulty, RecipeId};

/// Curated catalog entry used as ground truth when enriching saved recipes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRecipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub seasons: Option<Vec<String>>,
}

impl FeaturedRecipe {
    pub fn cook_time_minutes(&self) -> Option<u32> {
        self.time.as_deref().and_then(parse_minutes)
    }
}

/// Parses a human cook-time label into whole minutes.
///
/// `"35 min"` is 35, `"1 hr 15 min"` is 75, `"1.5 hours"` is 90 and a bare
/// number is read as minutes. Returns `None` when the label has no number.
pub fn parse_minutes(label: &str) -> Option<u32> {
    let tokens = tokenize(&label.to_lowercase());
    let mut total = 0.0_f64;
    let mut found = false;

    for (index, token) in tokens.iter().enumerate() {
        let Ok(amount) = token.parse::<f64>() else {
            continue;
        };
        let unit = tokens.get(index + 1).map(String::as_str).unwrap_or("");
        let factor = if unit.starts_with('h') { 60.0 } else { 1.0 };
        total += amount * factor;
        found = true;
    }

    found.then(|| total.round().max(0.0) as u32)
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_numeric = false;

    for ch in input.chars() {
        let numeric = ch.is_ascii_digit() || ch == '.';
        if !numeric && !ch.is_alphabetic() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && numeric != current_numeric {
            tokens.push(std::mem::take(&mut current));
        }
        current_numeric = numeric;
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
