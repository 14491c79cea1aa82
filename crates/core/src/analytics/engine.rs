use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::CatalogLookup;
use crate::domain::profile::DemoProfile;
use crate::domain::saved::{parse_collections, parse_saved_list, Collection, SavedRecipeRef};
use crate::storage::{KeyValueStore, StorageKey};

use super::achievements::{achievement_progress, earned_achievements, earned_label};
use super::aggregate::{
    average_rating, cook_time_distribution, cuisine_distribution, difficulty_breakdown,
    minutes_to_hours, top_ingredients, total_cooking_minutes,
};
use super::enrich::{enrich, flatten_saved};
use super::recommendations::recommend;
use super::types::{AdvancedAnalyticsData, AnalyticsData, EnrichedRecipe};

/// Raw saved references as loaded from storage, before dedup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedRecipes {
    pub favorites: Vec<SavedRecipeRef>,
    pub collections: Vec<Collection>,
}

pub struct CookingAnalyticsEngine<S, C> {
    store: S,
    catalog: C,
}

impl<S, C> CookingAnalyticsEngine<S, C>
where
    S: KeyValueStore,
    C: CatalogLookup,
{
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Never fails: unreadable storage degrades to an empty population.
    pub async fn compute_cooking_analytics(
        &self,
        user_id: &str,
        is_demo_user: bool,
    ) -> AnalyticsData {
        self.compute_cooking_analytics_at(user_id, is_demo_user, Utc::now()).await
    }

    pub async fn compute_cooking_analytics_at(
        &self,
        user_id: &str,
        is_demo_user: bool,
        now: DateTime<Utc>,
    ) -> AnalyticsData {
        let saved = self.load_saved_recipes(user_id, is_demo_user).await;
        let recipes = self.enrich_saved(&saved);
        let analytics = summarize(&recipes, now);

        debug!(
            event_name = "analytics.compute.completed",
            user_id = user_id,
            demo = is_demo_user,
            total_recipes = analytics.total_recipes,
            achievements = analytics.achievements.len(),
            "cooking analytics computed"
        );
        analytics
    }

    pub async fn compute_advanced_analytics(
        &self,
        user_id: &str,
        is_demo_user: bool,
    ) -> AdvancedAnalyticsData {
        self.compute_advanced_analytics_at(user_id, is_demo_user, Utc::now()).await
    }

    pub async fn compute_advanced_analytics_at(
        &self,
        user_id: &str,
        is_demo_user: bool,
        now: DateTime<Utc>,
    ) -> AdvancedAnalyticsData {
        advance(self.compute_cooking_analytics_at(user_id, is_demo_user, now).await)
    }

    pub fn enrich_saved(&self, saved: &SavedRecipes) -> Vec<EnrichedRecipe> {
        flatten_saved(&saved.favorites, &saved.collections)
            .into_iter()
            .map(|reference| enrich(reference, &self.catalog))
            .collect()
    }

    /// Demo accounts read the shared `demoUser` blob; real accounts read
    /// their own favorites and collections keys.
    pub async fn load_saved_recipes(&self, user_id: &str, is_demo_user: bool) -> SavedRecipes {
        if is_demo_user {
            let profile = match self.read_raw(StorageKey::DEMO_USER).await {
                Some(raw) => DemoProfile::from_json(&raw),
                None => DemoProfile::default(),
            };
            return SavedRecipes {
                favorites: profile.favorites().to_vec(),
                collections: profile.collections().to_vec(),
            };
        }

        let favorites_key = StorageKey::favorites(user_id);
        let collections_key = StorageKey::collections(user_id);

        let favorites = self
            .read_json(&favorites_key)
            .await
            .map(|value| parse_saved_list(&value, &favorites_key))
            .unwrap_or_default();
        let collections = self
            .read_json(&collections_key)
            .await
            .map(|value| parse_collections(&value, &collections_key))
            .unwrap_or_default();

        SavedRecipes { favorites, collections }
    }

    async fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    event_name = "analytics.storage.read_failed",
                    key = key,
                    error = %error,
                    "storage read failed; treating entry as empty"
                );
                None
            }
        }
    }

    async fn read_json(&self, key: &str) -> Option<Value> {
        let raw = self.read_raw(key).await?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(
                    event_name = "analytics.storage.malformed",
                    source = key,
                    error = %error,
                    "stored entry is not valid json; treating as empty"
                );
                None
            }
        }
    }
}

/// Aggregates an enriched population into the analytics shape.
pub fn summarize(recipes: &[EnrichedRecipe], now: DateTime<Utc>) -> AnalyticsData {
    let favorite_cuisines = cuisine_distribution(recipes);
    let achievements =
        earned_achievements(recipes.len(), favorite_cuisines.len(), &earned_label(now));

    AnalyticsData {
        total_recipes: recipes.len(),
        total_cooking_time: total_cooking_minutes(recipes),
        average_rating: average_rating(recipes),
        favorite_cuisines,
        difficulty_breakdown: difficulty_breakdown(recipes),
        cooking_time_distribution: cook_time_distribution(recipes),
        top_ingredients: top_ingredients(recipes),
        achievements,
        weekly_progress: Vec::new(),
        monthly_trends: Vec::new(),
    }
}

/// Wraps a summary with hours, achievement progress and recommendations.
pub fn advance(summary: AnalyticsData) -> AdvancedAnalyticsData {
    let total_cooking_hours = minutes_to_hours(summary.total_cooking_time);
    let achievements = achievement_progress(&summary.achievements);
    let recommendations = recommend(&summary);

    AdvancedAnalyticsData { summary, total_cooking_hours, achievements, recommendations }
}
