use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use sufra_core::domain::recipe::Recipe;
use sufra_core::halal::{flagged_terms, is_halal, is_non_halal_ingredient, suggest_substitute};

use crate::commands::CommandResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HalalTarget {
    Ingredient(String),
    File(PathBuf),
}

pub fn run(target: HalalTarget) -> CommandResult {
    match target {
        HalalTarget::Ingredient(term) => check_ingredient(&term),
        HalalTarget::File(path) => check_file(path),
    }
}

fn check_ingredient(term: &str) -> CommandResult {
    let term = term.trim();
    if term.is_empty() {
        return CommandResult::failure("halal", "usage", "--ingredient must not be empty", 64);
    }

    let non_halal = is_non_halal_ingredient(term);
    let substitute = if non_halal { suggest_substitute(term) } else { None };
    let message = match (non_halal, substitute) {
        (false, _) => format!("`{term}` is not on the blocklist"),
        (true, Some(substitute)) => format!("`{term}` is not halal; try {substitute}"),
        (true, None) => format!("`{term}` is not halal"),
    };

    CommandResult::success_with_data(
        "halal",
        message,
        Some(json!({ "ingredient": term, "halal": !non_halal, "substitute": substitute })),
    )
}

fn check_file(path: PathBuf) -> CommandResult {
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "halal",
                "input_read",
                format!("could not read `{}`: {error}", path.display()),
                66,
            );
        }
    };
    let record: Value = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(error) => {
            return CommandResult::failure(
                "halal",
                "input_parse",
                format!("`{}` is not valid JSON: {error}", path.display()),
                65,
            );
        }
    };

    let recipe = Recipe::from_meal_record(&record);
    let halal = is_halal(recipe.as_ref());
    let flagged = recipe.as_ref().map(flagged_terms).unwrap_or_default();
    let name = recipe.as_ref().map(|recipe| recipe.name.clone()).unwrap_or_default();

    let message = match (&recipe, halal) {
        (None, _) => "input is not a meal record; treated as not halal".to_string(),
        (Some(_), true) => format!("`{name}` passes the halal blocklist"),
        (Some(_), false) => format!("`{name}` mentions {}", flagged.join(", ")),
    };

    CommandResult::success_with_data(
        "halal",
        message,
        Some(json!({ "recipe": name, "halal": halal, "flaggedTerms": flagged })),
    )
}
