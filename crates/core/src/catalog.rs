use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::featured::FeaturedRecipe;
use crate::domain::recipe::{Difficulty, RecipeId};

/// Lookup seam between the analytics engine and wherever featured recipes live.
pub trait CatalogLookup: Send + Sync {
    fn find_by_id(&self, id: &str) -> Option<&FeaturedRecipe>;

    fn recipes(&self) -> &[FeaturedRecipe];
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("catalog contains duplicate recipe id `{0}`")]
    DuplicateId(String),
}

#[derive(Clone, Debug, Default)]
pub struct FeaturedCatalog {
    recipes: Vec<FeaturedRecipe>,
}

#[derive(Debug, Clone, Copy)]
struct FeaturedSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    image: &'static str,
    rating: f64,
    tags: &'static [&'static str],
    ingredients: &'static [&'static str],
    difficulty: Difficulty,
    time: &'static str,
    category: &'static str,
    seasons: &'static [&'static str],
}

const FEATURED_SEEDS: &[FeaturedSeed] = &[
    FeaturedSeed {
        id: "1",
        name: "Spiced Chicken Shawarma",
        description: "Yogurt-marinated chicken thighs roasted with cumin and paprika.",
        image: "/images/featured/chicken-shawarma.jpg",
        rating: 4.9,
        tags: &["chicken", "grill", "street food"],
        ingredients: &["Chicken thighs", "Yogurt", "Garlic", "Cumin", "Paprika", "Flatbread"],
        difficulty: Difficulty::Medium,
        time: "35 min",
        category: "Main",
        seasons: &["summer", "autumn"],
    },
    FeaturedSeed {
        id: "2",
        name: "Lemon Herb Quinoa Bowl",
        description: "Quinoa tossed with cucumber, chickpeas, parsley and lemon.",
        image: "/images/featured/quinoa-bowl.jpg",
        rating: 4.7,
        tags: &["vegetarian", "healthy", "quick"],
        ingredients: &["Quinoa", "Chickpeas", "Cucumber", "Parsley", "Lemon", "Olive oil"],
        difficulty: Difficulty::Easy,
        time: "20 min",
        category: "Salad",
        seasons: &["spring", "summer"],
    },
    FeaturedSeed {
        id: "3",
        name: "Lamb Tagine with Apricots",
        description: "Slow-braised lamb shoulder with apricots, almonds and warm spices.",
        image: "/images/featured/lamb-tagine.jpg",
        rating: 4.8,
        tags: &["lamb", "slow cook", "moroccan"],
        ingredients: &["Lamb shoulder", "Dried apricots", "Onion", "Garlic", "Cinnamon", "Almonds"],
        difficulty: Difficulty::Hard,
        time: "1 hr 45 min",
        category: "Main",
        seasons: &["autumn", "winter"],
    },
    FeaturedSeed {
        id: "4",
        name: "Cardamom Mango Lassi Pots",
        description: "Set mango and yogurt pots scented with cardamom and pistachio.",
        image: "/images/featured/mango-lassi-pots.jpg",
        rating: 4.6,
        tags: &["dessert", "no bake"],
        ingredients: &["Mango", "Yogurt", "Cardamom", "Honey", "Pistachios"],
        difficulty: Difficulty::Easy,
        time: "15 min",
        category: "Dessert",
        seasons: &["summer"],
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl From<&FeaturedSeed> for FeaturedRecipe {
    fn from(seed: &FeaturedSeed) -> Self {
        Self {
            id: RecipeId(seed.id.to_owned()),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            image: seed.image.to_owned(),
            rating: seed.rating,
            tags: owned(seed.tags),
            ingredients: Some(owned(seed.ingredients)),
            difficulty: Some(seed.difficulty),
            time: Some(seed.time.to_owned()),
            category: Some(seed.category.to_owned()),
            seasons: Some(owned(seed.seasons)),
        }
    }
}

impl FeaturedCatalog {
    pub fn new(recipes: Vec<FeaturedRecipe>) -> Result<Self, CatalogError> {
        for (index, recipe) in recipes.iter().enumerate() {
            if recipes[..index].iter().any(|earlier| earlier.id == recipe.id) {
                return Err(CatalogError::DuplicateId(recipe.id.0.clone()));
            }
        }
        Ok(Self { recipes })
    }

    /// The curated catalog shipped with the application.
    pub fn builtin() -> Self {
        Self { recipes: FEATURED_SEEDS.iter().map(FeaturedRecipe::from).collect() }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let recipes = serde_json::from_str::<Vec<FeaturedRecipe>>(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        Self::new(recipes)
    }

    /// Loads from `path` when one is configured, otherwise the builtin catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl CatalogLookup for FeaturedCatalog {
    fn find_by_id(&self, id: &str) -> Option<&FeaturedRecipe> {
        self.recipes.iter().find(|recipe| recipe.id.as_str() == id)
    }

    fn recipes(&self) -> &[FeaturedRecipe] {
        &self.recipes
    }
}
