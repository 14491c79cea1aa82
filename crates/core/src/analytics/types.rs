//! Result shapes returned to the web client.

use serde::{Deserialize, Serialize};

use crate::domain::recipe::Difficulty;

/// A saved recipe reconciled against the featured catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cook_time_minutes: u32,
    /// Always within `0.0..=5.0`.
    pub rating: f64,
    pub difficulty: Difficulty,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisineShare {
    pub name: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyShare {
    pub level: Difficulty,
    pub count: usize,
    pub percentage: u32,
}

/// Cook-time histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookTimeBucket {
    /// Up to and including 30 minutes
    Quick,
    /// 31 to 60 minutes
    Moderate,
    /// Over an hour
    Long,
}

impl CookTimeBucket {
    pub const ALL: [CookTimeBucket; 3] =
        [CookTimeBucket::Quick, CookTimeBucket::Moderate, CookTimeBucket::Long];

    pub fn for_minutes(minutes: u32) -> Self {
        if minutes <= 30 {
            Self::Quick
        } else if minutes <= 60 {
            Self::Moderate
        } else {
            Self::Long
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quick => "0-30 min",
            Self::Moderate => "30-60 min",
            Self::Long => "60+ min",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookTimeShare {
    pub range: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientShare {
    pub name: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    /// `"{Month} {Year}"` of the computation, not of first qualification.
    pub earned_date: String,
}

/// Per-week activity. Never populated: no cooked-at timestamps are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    pub week: String,
    pub recipes_cooked: usize,
    pub minutes: u32,
}

/// Per-month activity. Never populated: no cooked-at timestamps are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: String,
    pub recipes_cooked: usize,
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_recipes: usize,
    /// Minutes.
    pub total_cooking_time: u32,
    pub average_rating: f64,
    pub favorite_cuisines: Vec<CuisineShare>,
    pub difficulty_breakdown: Vec<DifficultyShare>,
    pub cooking_time_distribution: Vec<CookTimeShare>,
    pub top_ingredients: Vec<IngredientShare>,
    pub achievements: Vec<Achievement>,
    pub weekly_progress: Vec<WeeklyProgress>,
    pub monthly_trends: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub earned: bool,
    pub earned_date: Option<String>,
    pub progress: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Onboarding,
    Cuisine,
    Collection,
    Ingredient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Fixed per rule, not learned.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAnalyticsData {
    pub summary: AnalyticsData,
    pub total_cooking_hours: f64,
    pub achievements: Vec<AchievementProgress>,
    pub recommendations: Vec<Recommendation>,
}
