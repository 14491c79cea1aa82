//! Halal screening for recipe search results.
//!
//! Matching is a plain case-insensitive substring scan over the recipe text.
//! It is intentionally not word-bounded, so words that merely contain a
//! blocked term (`portobello` contains `port`, `ginger` contains `gin`) are
//! rejected as well. Search results are gated on [`is_halal`]; ingredient
//! substitution hints use the looser [`is_non_halal_ingredient`].

mod substitutes;

pub use substitutes::suggest_substitute;

use crate::domain::recipe::Recipe;

pub const PORK_TERMS: &[&str] =
    &["pork", "bacon", "ham", "sausage", "prosciutto", "pancetta", "lard", "speck"];

pub const ALCOHOL_TERMS: &[&str] = &[
    "alcohol", "wine", "beer", "vodka", "whiskey", "rum", "gin", "tequila", "brandy", "sherry",
    "port", "cognac", "bourbon", "scotch", "liqueur", "schnapps", "absinthe",
];

/// Every blocked term, pork terms first.
pub fn blocklist() -> impl Iterator<Item = &'static str> {
    PORK_TERMS.iter().chain(ALCOHOL_TERMS.iter()).copied()
}

/// Fails closed: a missing recipe is never reported as halal.
pub fn is_halal(recipe: Option<&Recipe>) -> bool {
    match recipe {
        Some(recipe) => flagged_terms(recipe).is_empty(),
        None => false,
    }
}

/// Blocked terms found anywhere in the recipe text, in blocklist order.
pub fn flagged_terms(recipe: &Recipe) -> Vec<&'static str> {
    let text = searchable_text(recipe);
    blocklist().filter(|term| text.contains(term)).collect()
}

/// Bidirectional check used for substitution hints: the term contains a
/// blocked word (`"pork belly"`) or is itself part of one (`"brand"`).
pub fn is_non_halal_ingredient(term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }

    blocklist().any(|blocked| needle.contains(blocked) || blocked.contains(needle.as_str()))
}

/// Keeps the halal recipes, preserving input order.
pub fn filter_halal(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.into_iter().filter(|recipe| is_halal(Some(recipe))).collect()
}

fn searchable_text(recipe: &Recipe) -> String {
    let mut parts = vec![
        recipe.name.as_str(),
        recipe.category.as_str(),
        recipe.area.as_str(),
        recipe.instructions.as_str(),
    ];
    parts.extend(recipe.ingredients.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}
