use super::types::{AnalyticsData, Recommendation, RecommendationKind};
use super::MAX_RECOMMENDATIONS;

const ONBOARDING_CONFIDENCE: f64 = 1.0;
const CUISINE_CONFIDENCE: f64 = 0.8;
const INGREDIENT_CONFIDENCE: f64 = 0.85;
const COLLECTION_CONFIDENCE: f64 = 0.9;

/// Below this many saved recipes the user is nudged to keep collecting.
const SMALL_COLLECTION: usize = 5;

/// Rule-based hints derived from a computed summary.
///
/// An empty population gets only the onboarding hint. Otherwise the cuisine,
/// collection-size and ingredient rules fire independently, in that order,
/// capped at three.
pub fn recommend(summary: &AnalyticsData) -> Vec<Recommendation> {
    if summary.total_recipes == 0 {
        return vec![Recommendation {
            kind: RecommendationKind::Onboarding,
            title: "Start your recipe collection".to_owned(),
            description: "Save a few recipes you like to unlock personalized insights.".to_owned(),
            confidence: ONBOARDING_CONFIDENCE,
        }];
    }

    let mut recommendations = Vec::new();

    if let Some(cuisine) = summary.favorite_cuisines.first() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Cuisine,
            title: format!("Explore more {} recipes", cuisine.name),
            description: format!(
                "{} makes up {}% of your saved recipes.",
                cuisine.name, cuisine.percentage
            ),
            confidence: CUISINE_CONFIDENCE,
        });
    }

    if summary.total_recipes < SMALL_COLLECTION {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Collection,
            title: "Add more recipes".to_owned(),
            description: format!(
                "You have {} saved recipes. Save {} more to earn Getting Started.",
                summary.total_recipes,
                SMALL_COLLECTION - summary.total_recipes
            ),
            confidence: COLLECTION_CONFIDENCE,
        });
    }

    if let Some(ingredient) = summary.top_ingredients.first() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Ingredient,
            title: format!("Recipes with {}", ingredient.name),
            description: format!(
                "{} shows up in your recipes more than any other ingredient.",
                ingredient.name
            ),
            confidence: INGREDIENT_CONFIDENCE,
        });
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
