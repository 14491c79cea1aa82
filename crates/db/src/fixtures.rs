use sufra_core::analytics::flatten_saved;
use sufra_core::domain::profile::DemoProfile;
use sufra_core::domain::saved::{parse_collections, parse_saved_list, Collection, SavedRecipeRef};
use sufra_core::storage::{KeyValueStore, StorageError, StorageKey};

use crate::repositories::SavedRecipeWriter;

pub const SAMPLE_USER_ID: &str = "sample-cook";

#[derive(Debug, Clone, Copy)]
struct SeedRecipe {
    id: &'static str,
    title: &'static str,
    category: &'static str,
    cook_time: Option<u32>,
    rating: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct SeedCollection {
    name: &'static str,
    recipe_ids: &'static [&'static str],
}

/// Ids 1-4 resolve against the built-in featured catalog; the rest carry
/// their own metadata.
const SEED_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        id: "1",
        title: "Spiced Chicken Shawarma",
        category: "Main",
        cook_time: None,
        rating: None,
    },
    SeedRecipe {
        id: "2",
        title: "Lemon Herb Quinoa Bowl",
        category: "Salad",
        cook_time: None,
        rating: None,
    },
    SeedRecipe {
        id: "3",
        title: "Lamb Tagine with Apricots",
        category: "Main",
        cook_time: None,
        rating: None,
    },
    SeedRecipe {
        id: "4",
        title: "Cardamom Mango Lassi Pots",
        category: "Dessert",
        cook_time: None,
        rating: None,
    },
    SeedRecipe {
        id: "52772",
        title: "Teriyaki Chicken Casserole",
        category: "Chicken",
        cook_time: Some(45),
        rating: Some(4.4),
    },
    SeedRecipe {
        id: "52874",
        title: "Beef and Mustard Pie",
        category: "Beef",
        cook_time: Some(90),
        rating: Some(4.2),
    },
    SeedRecipe {
        id: "52959",
        title: "Baked Salmon with Fennel and Tomatoes",
        category: "Seafood",
        cook_time: Some(35),
        rating: Some(4.6),
    },
];

const DEMO_FAVORITES: &[&str] = &["1", "3"];
const DEMO_COLLECTIONS: &[SeedCollection] =
    &[SeedCollection { name: "Family Favorites", recipe_ids: &["2", "4", "1"] }];

const SAMPLE_FAVORITES: &[&str] = &["1", "52772", "52874"];
const SAMPLE_COLLECTIONS: &[SeedCollection] = &[
    SeedCollection { name: "Weeknight Dinners", recipe_ids: &["2", "52959"] },
    SeedCollection { name: "Sweet Things", recipe_ids: &["4", "1"] },
];

/// Deterministic saved-recipe data for the shared demo profile and one
/// sample account. Loading twice leaves storage in the same state.
pub struct DemoSeedDataset;

impl DemoSeedDataset {
    pub const DEMO_DISTINCT_RECIPES: usize = 4;
    pub const SAMPLE_DISTINCT_RECIPES: usize = 6;

    pub fn demo_profile() -> DemoProfile {
        DemoProfile::new(references(DEMO_FAVORITES), collections(DEMO_COLLECTIONS))
    }

    pub async fn load<S>(store: &S) -> Result<SeedResult, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let writer = SavedRecipeWriter::new(store);

        writer.save_demo_profile(&Self::demo_profile()).await?;

        writer.clear_user(SAMPLE_USER_ID).await?;
        for reference in references(SAMPLE_FAVORITES) {
            writer.add_favorite(SAMPLE_USER_ID, &reference).await?;
        }
        for collection in SAMPLE_COLLECTIONS {
            for reference in references(collection.recipe_ids) {
                writer.add_to_collection(SAMPLE_USER_ID, collection.name, &reference).await?;
            }
        }

        Ok(SeedResult {
            users_seeded: vec![
                UserSeedInfo {
                    user_id: StorageKey::DEMO_USER,
                    favorites: DEMO_FAVORITES.len(),
                    collections: DEMO_COLLECTIONS.len(),
                    distinct_recipes: Self::DEMO_DISTINCT_RECIPES,
                },
                UserSeedInfo {
                    user_id: SAMPLE_USER_ID,
                    favorites: SAMPLE_FAVORITES.len(),
                    collections: SAMPLE_COLLECTIONS.len(),
                    distinct_recipes: Self::SAMPLE_DISTINCT_RECIPES,
                },
            ],
        })
    }

    pub async fn verify<S>(store: &S) -> Result<VerificationResult, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut checks = Vec::new();

        let demo = match store.get(StorageKey::DEMO_USER).await? {
            Some(raw) => DemoProfile::from_json(&raw),
            None => DemoProfile::default(),
        };
        checks.push(("demo-favorites", demo.favorites().len() == DEMO_FAVORITES.len()));
        checks.push(("demo-collections", demo.collections().len() == DEMO_COLLECTIONS.len()));
        checks.push((
            "demo-distinct-recipes",
            flatten_saved(demo.favorites(), demo.collections()).len()
                == Self::DEMO_DISTINCT_RECIPES,
        ));

        let favorites_key = StorageKey::favorites(SAMPLE_USER_ID);
        let favorites = match read_json(store, &favorites_key).await? {
            Some(value) => parse_saved_list(&value, &favorites_key),
            None => Vec::new(),
        };
        let collections_key = StorageKey::collections(SAMPLE_USER_ID);
        let sample_collections = match read_json(store, &collections_key).await? {
            Some(value) => parse_collections(&value, &collections_key),
            None => Vec::new(),
        };

        checks.push(("sample-favorites", favorites.len() == SAMPLE_FAVORITES.len()));
        checks.push(("sample-collections", sample_collections.len() == SAMPLE_COLLECTIONS.len()));
        checks.push((
            "sample-distinct-recipes",
            flatten_saved(&favorites, &sample_collections).len() == Self::SAMPLE_DISTINCT_RECIPES,
        ));

        let all_present = checks.iter().all(|(_, ok)| *ok);
        Ok(VerificationResult { all_present, checks })
    }
}

async fn read_json<S>(store: &S, key: &str) -> Result<Option<serde_json::Value>, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|error| StorageError::Encode(error.to_string()))
}

fn references(ids: &[&str]) -> Vec<SavedRecipeRef> {
    ids.iter()
        .filter_map(|id| SEED_RECIPES.iter().find(|seed| seed.id == *id))
        .map(reference)
        .collect()
}

fn reference(seed: &SeedRecipe) -> SavedRecipeRef {
    let mut reference =
        SavedRecipeRef::new(seed.id).with_title(seed.title).with_category(seed.category);
    if let Some(minutes) = seed.cook_time {
        reference = reference.with_cook_time(minutes);
    }
    if let Some(rating) = seed.rating {
        reference = reference.with_rating(rating);
    }
    reference
}

fn collections(seeds: &[SeedCollection]) -> Vec<Collection> {
    seeds
        .iter()
        .map(|seed| {
            let mut collection = Collection::new(seed.name);
            collection.recipes = references(seed.recipe_ids);
            collection
        })
        .collect()
}

#[derive(Debug)]
pub struct SeedResult {
    pub users_seeded: Vec<UserSeedInfo>,
}

#[derive(Debug)]
pub struct UserSeedInfo {
    pub user_id: &'static str,
    pub favorites: usize,
    pub collections: usize,
    pub distinct_recipes: usize,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
