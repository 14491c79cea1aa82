use std::collections::HashSet;

use crate::catalog::CatalogLookup;
use crate::domain::featured::FeaturedRecipe;
use crate::domain::saved::{Collection, SavedRecipeRef};

use super::types::EnrichedRecipe;

const UNTITLED: &str = "Untitled recipe";

/// Favorites first, then each collection in order; the first occurrence of an
/// id wins and blank ids are dropped.
pub fn flatten_saved<'a>(
    favorites: &'a [SavedRecipeRef],
    collections: &'a [Collection],
) -> Vec<&'a SavedRecipeRef> {
    let mut seen = HashSet::new();

    favorites
        .iter()
        .chain(collections.iter().flat_map(|collection| collection.recipes.iter()))
        .filter(|saved| !saved.id.trim().is_empty())
        .filter(|saved| seen.insert(saved.id.trim()))
        .collect()
}

/// Reconciles a saved reference with its catalog entry.
///
/// Catalog values win for cook time, difficulty and ingredients. A rating
/// cached on the saved reference wins over the catalog rating. Without a
/// catalog match the cached values are used, then the defaults.
pub fn enrich<C>(saved: &SavedRecipeRef, catalog: &C) -> EnrichedRecipe
where
    C: CatalogLookup + ?Sized,
{
    let featured = catalog.find_by_id(saved.id.trim());

    let cook_time_minutes = featured
        .and_then(FeaturedRecipe::cook_time_minutes)
        .or(saved.cook_time)
        .unwrap_or(0);
    let difficulty =
        featured.and_then(|entry| entry.difficulty).or(saved.difficulty).unwrap_or_default();
    let rating = saved.rating.or_else(|| featured.map(|entry| entry.rating)).unwrap_or(0.0);
    let ingredients = featured
        .and_then(|entry| entry.ingredients.clone())
        .filter(|ingredients| !ingredients.is_empty())
        .unwrap_or_else(|| saved.ingredients.clone());

    EnrichedRecipe {
        id: saved.id.trim().to_owned(),
        name: saved
            .title
            .clone()
            .or_else(|| featured.map(|entry| entry.name.clone()))
            .unwrap_or_else(|| UNTITLED.to_owned()),
        category: saved
            .category
            .clone()
            .or_else(|| featured.and_then(|entry| entry.category.clone()))
            .unwrap_or_default(),
        cook_time_minutes,
        rating: clamp_rating(rating),
        difficulty,
        ingredients,
    }
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(0.0, 5.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{enrich, flatten_saved};
    use crate::catalog::FeaturedCatalog;
    use crate::domain::recipe::Difficulty;
    use crate::domain::saved::{Collection, SavedRecipeRef};

    #[test]
    fn favorites_win_over_collection_duplicates() {
        let favorites = vec![SavedRecipeRef::new("1").with_title("From favorites")];
        let mut collection = Collection::new("Dinner");
        collection.recipes = vec![
            SavedRecipeRef::new("1").with_title("From collection"),
            SavedRecipeRef::new("9"),
        ];

        let collections = [collection];
        let flattened = flatten_saved(&favorites, &collections);
        let titles: Vec<_> = flattened.iter().map(|saved| saved.title.as_deref()).collect();

        assert_eq!(flattened.len(), 2);
        assert_eq!(titles[0], Some("From favorites"));
    }

    #[test]
    fn blank_ids_are_dropped() {
        let favorites =
            vec![SavedRecipeRef::new(""), SavedRecipeRef::new("  "), SavedRecipeRef::new("3")];
        assert_eq!(flatten_saved(&favorites, &[]).len(), 1);
    }

    #[test]
    fn catalog_match_supplies_time_difficulty_and_ingredients() {
        let catalog = FeaturedCatalog::builtin();
        let saved = SavedRecipeRef::new("1").with_cook_time(99);

        let enriched = enrich(&saved, &catalog);

        assert_eq!(enriched.cook_time_minutes, 35);
        assert_eq!(enriched.difficulty, Difficulty::Medium);
        assert_eq!(enriched.rating, 4.9);
        assert_eq!(enriched.category, "Main");
        assert_eq!(enriched.name, "Spiced Chicken Shawarma");
        assert!(!enriched.ingredients.is_empty());
    }

    #[test]
    fn explicit_saved_rating_beats_catalog_rating() {
        let catalog = FeaturedCatalog::builtin();
        let enriched = enrich(&SavedRecipeRef::new("1").with_rating(3.0), &catalog);

        assert_eq!(enriched.rating, 3.0);
    }

    #[test]
    fn unknown_id_falls_back_to_defaults() {
        let catalog = FeaturedCatalog::builtin();
        let enriched = enrich(&SavedRecipeRef::new("52772"), &catalog);

        assert_eq!(enriched.difficulty, Difficulty::Medium);
        assert_eq!(enriched.cook_time_minutes, 0);
        assert_eq!(enriched.rating, 0.0);
        assert!(enriched.ingredients.is_empty());
        assert_eq!(enriched.category, "");
    }

    #[test]
    fn unknown_id_keeps_cached_values() {
        let catalog = FeaturedCatalog::builtin();
        let saved = SavedRecipeRef::new("52772").with_category("Seafood").with_cook_time(40);

        let enriched = enrich(&saved, &catalog);

        assert_eq!(enriched.category, "Seafood");
        assert_eq!(enriched.cook_time_minutes, 40);
    }

    #[test]
    fn ratings_are_clamped() {
        let catalog = FeaturedCatalog::builtin();

        assert_eq!(enrich(&SavedRecipeRef::new("x").with_rating(9.5), &catalog).rating, 5.0);
        assert_eq!(enrich(&SavedRecipeRef::new("x").with_rating(-2.0), &catalog).rating, 0.0);
        assert_eq!(enrich(&SavedRecipeRef::new("x").with_rating(f64::NAN), &catalog).rating, 0.0);
    }
}
