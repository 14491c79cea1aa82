//! Cooking analytics over a user's saved recipes.
//!
//! Everything here is a pure projection of current storage contents: saved
//! references are loaded, deduplicated, enriched against the featured
//! catalog and aggregated on every call. Nothing is cached or persisted,
//! including achievement earn dates.

mod achievements;
mod aggregate;
mod engine;
mod enrich;
mod recommendations;
mod types;

pub use achievements::{achievement_progress, earned_achievements, earned_label};
pub use aggregate::{
    average_rating, capitalize_first, cook_time_distribution, cuisine_distribution,
    difficulty_breakdown, minutes_to_hours, percentage, top_ingredients, total_cooking_minutes,
};
pub use engine::{advance, summarize, CookingAnalyticsEngine, SavedRecipes};
pub use enrich::{enrich, flatten_saved};
pub use recommendations::recommend;
pub use types::*;

/// Bucket name for recipes without a category.
pub const OTHER_CUISINE: &str = "Other";

/// Number of ingredients reported in the top-ingredient list.
pub const TOP_INGREDIENT_LIMIT: usize = 10;

/// Maximum recommendations in the advanced view.
pub const MAX_RECOMMENDATIONS: usize = 3;
