use std::collections::HashMap;

use crate::domain::recipe::Difficulty;

use super::types::{
    CookTimeBucket, CookTimeShare, CuisineShare, DifficultyShare, EnrichedRecipe, IngredientShare,
};
use super::{OTHER_CUISINE, TOP_INGREDIENT_LIMIT};

/// Rounded share of `count` in `total`; zero for an empty population.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

pub fn cuisine_distribution(recipes: &[EnrichedRecipe]) -> Vec<CuisineShare> {
    let total = recipes.len();
    let counts = count_in_order(recipes.iter().map(|recipe| {
        let category = recipe.category.trim();
        if category.is_empty() {
            OTHER_CUISINE.to_owned()
        } else {
            category.to_owned()
        }
    }));

    counts
        .into_iter()
        .map(|(name, count)| CuisineShare { name, count, percentage: percentage(count, total) })
        .collect()
}

/// Always three entries, `Easy`, `Medium`, `Hard`, even when empty.
pub fn difficulty_breakdown(recipes: &[EnrichedRecipe]) -> Vec<DifficultyShare> {
    let total = recipes.len();

    Difficulty::ALL
        .iter()
        .map(|level| {
            let count = recipes.iter().filter(|recipe| recipe.difficulty == *level).count();
            DifficultyShare { level: *level, count, percentage: percentage(count, total) }
        })
        .collect()
}

/// Always three buckets: up to 30 minutes, up to 60, and longer.
pub fn cook_time_distribution(recipes: &[EnrichedRecipe]) -> Vec<CookTimeShare> {
    let total = recipes.len();

    CookTimeBucket::ALL
        .iter()
        .map(|bucket| {
            let count = recipes
                .iter()
                .filter(|recipe| CookTimeBucket::for_minutes(recipe.cook_time_minutes) == *bucket)
                .count();
            CookTimeShare {
                range: bucket.label().to_owned(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

/// Most frequent ingredients across all recipes, normalized by trimming and
/// lower-casing, then shown with the first letter upper-cased. Percentages are
/// shares of all ingredient occurrences, not of recipes.
pub fn top_ingredients(recipes: &[EnrichedRecipe]) -> Vec<IngredientShare> {
    let normalized = recipes
        .iter()
        .flat_map(|recipe| recipe.ingredients.iter())
        .map(|ingredient| ingredient.trim().to_lowercase())
        .filter(|ingredient| !ingredient.is_empty());
    let counts = count_in_order(normalized);
    let occurrences: usize = counts.iter().map(|(_, count)| count).sum();

    counts
        .into_iter()
        .take(TOP_INGREDIENT_LIMIT)
        .map(|(name, count)| IngredientShare {
            name: capitalize_first(&name),
            count,
            percentage: percentage(count, occurrences),
        })
        .collect()
}

/// Mean rating rounded to one decimal; zero for an empty population.
pub fn average_rating(recipes: &[EnrichedRecipe]) -> f64 {
    if recipes.is_empty() {
        return 0.0;
    }
    let sum: f64 = recipes.iter().map(|recipe| recipe.rating).sum();
    round_one_decimal(sum / recipes.len() as f64)
}

pub fn total_cooking_minutes(recipes: &[EnrichedRecipe]) -> u32 {
    recipes.iter().map(|recipe| recipe.cook_time_minutes).fold(0, u32::saturating_add)
}

pub fn minutes_to_hours(minutes: u32) -> f64 {
    round_one_decimal(f64::from(minutes) / 60.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Counts keys, sorted by count descending; ties keep first-seen order.
fn count_in_order<I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for key in keys {
        match positions.get(&key) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::{
        average_rating, capitalize_first, cook_time_distribution, cuisine_distribution,
        difficulty_breakdown, minutes_to_hours, percentage, top_ingredients,
        total_cooking_minutes,
    };
    use crate::analytics::types::EnrichedRecipe;
    use crate::domain::recipe::Difficulty;

    fn recipe(id: &str, category: &str, minutes: u32, difficulty: Difficulty) -> EnrichedRecipe {
        EnrichedRecipe {
            id: id.to_owned(),
            name: format!("Recipe {id}"),
            category: category.to_owned(),
            cook_time_minutes: minutes,
            rating: 4.0,
            difficulty,
            ingredients: Vec::new(),
        }
    }

    #[test]
    fn percentage_of_empty_population_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
    }

    #[test]
    fn cuisines_sort_by_count_and_bucket_blank_as_other() {
        let recipes = vec![
            recipe("1", "Dessert", 10, Difficulty::Easy),
            recipe("2", "Main", 10, Difficulty::Easy),
            recipe("3", "", 10, Difficulty::Easy),
            recipe("4", "Main", 10, Difficulty::Easy),
        ];

        let cuisines = cuisine_distribution(&recipes);
        let names: Vec<_> = cuisines.iter().map(|share| share.name.as_str()).collect();

        assert_eq!(names, vec!["Main", "Dessert", "Other"]);
        assert_eq!(cuisines[0].percentage, 50);
        assert_eq!(cuisines[1].percentage, 25);
    }

    #[test]
    fn empty_population_has_no_cuisines_but_fixed_difficulty_and_time_buckets() {
        assert!(cuisine_distribution(&[]).is_empty());

        let difficulty = difficulty_breakdown(&[]);
        assert_eq!(
            difficulty.iter().map(|share| share.level).collect::<Vec<_>>(),
            Difficulty::ALL.to_vec()
        );
        assert!(difficulty.iter().all(|share| share.count == 0 && share.percentage == 0));

        let times = cook_time_distribution(&[]);
        assert_eq!(
            times.iter().map(|share| share.range.as_str()).collect::<Vec<_>>(),
            vec!["0-30 min", "30-60 min", "60+ min"]
        );
        assert!(times.iter().all(|share| share.count == 0 && share.percentage == 0));
    }

    #[test]
    fn cook_time_bucket_edges() {
        let recipes = vec![
            recipe("1", "A", 30, Difficulty::Easy),
            recipe("2", "A", 31, Difficulty::Easy),
            recipe("3", "A", 60, Difficulty::Easy),
            recipe("4", "A", 61, Difficulty::Easy),
        ];

        let counts: Vec<_> =
            cook_time_distribution(&recipes).iter().map(|share| share.count).collect();

        assert_eq!(counts, vec![1, 2, 1]);
    }

    #[test]
    fn distribution_percentages_sum_to_about_one_hundred() {
        let recipes = vec![
            recipe("1", "A", 10, Difficulty::Easy),
            recipe("2", "B", 45, Difficulty::Medium),
            recipe("3", "C", 90, Difficulty::Hard),
        ];

        let difficulty_sum: u32 =
            difficulty_breakdown(&recipes).iter().map(|share| share.percentage).sum();
        let time_sum: u32 =
            cook_time_distribution(&recipes).iter().map(|share| share.percentage).sum();
        let cuisine_sum: u32 =
            cuisine_distribution(&recipes).iter().map(|share| share.percentage).sum();

        let mut with_ingredients = recipes.clone();
        with_ingredients[0].ingredients = vec!["lamb".to_owned(), "mint".to_owned()];
        with_ingredients[1].ingredients = vec!["rice".to_owned()];
        with_ingredients[2].ingredients = vec!["lamb".to_owned(), "saffron".to_owned()];
        let ingredient_sum: u32 =
            top_ingredients(&with_ingredients).iter().map(|share| share.percentage).sum();

        for sum in [difficulty_sum, time_sum, cuisine_sum, ingredient_sum] {
            assert!((97..=103).contains(&sum), "sum {sum} out of rounding tolerance");
        }
    }

    #[test]
    fn top_ingredients_normalize_and_limit_to_ten() {
        let mut first = recipe("1", "A", 10, Difficulty::Easy);
        first.ingredients = vec![" Garlic ".to_owned(), "onion".to_owned()];
        let mut second = recipe("2", "A", 10, Difficulty::Easy);
        second.ingredients = (0..12).map(|n| format!("spice {n}")).collect();
        second.ingredients.push("GARLIC".to_owned());

        let top = top_ingredients(&[first, second]);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].name, "Garlic");
        assert_eq!(top[0].count, 2);
        // 2 of 15 ingredient occurrences
        assert_eq!(top[0].percentage, 13);
        assert_eq!(top[1].name, "Onion");
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        let mut recipes = vec![
            recipe("1", "A", 10, Difficulty::Easy),
            recipe("2", "A", 10, Difficulty::Easy),
            recipe("3", "A", 10, Difficulty::Easy),
        ];
        recipes[0].rating = 4.9;
        recipes[1].rating = 4.7;
        recipes[2].rating = 0.0;

        assert_eq!(average_rating(&recipes), 3.2);
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn totals_and_hours() {
        let recipes = vec![
            recipe("1", "A", 35, Difficulty::Easy),
            recipe("2", "A", 105, Difficulty::Easy),
        ];

        assert_eq!(total_cooking_minutes(&recipes), 140);
        assert_eq!(minutes_to_hours(140), 2.3);
        assert_eq!(minutes_to_hours(0), 0.0);
    }

    #[test]
    fn capitalizes_only_the_first_letter() {
        assert_eq!(capitalize_first("olive oil"), "Olive oil");
        assert_eq!(capitalize_first(""), "");
    }
}
