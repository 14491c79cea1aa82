pub mod analytics;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod halal;
pub mod storage;

pub use analytics::{
    AdvancedAnalyticsData, AnalyticsData, CookingAnalyticsEngine, EnrichedRecipe, Recommendation,
    RecommendationKind,
};
pub use catalog::{CatalogError, CatalogLookup, FeaturedCatalog};
pub use domain::featured::FeaturedRecipe;
pub use domain::profile::DemoProfile;
pub use domain::recipe::{Difficulty, Recipe, RecipeId};
pub use domain::saved::{Collection, SavedRecipeRef};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use halal::{filter_halal, is_halal, is_non_halal_ingredient, suggest_substitute};
pub use storage::{KeyValueStore, StorageError, StorageKey};
