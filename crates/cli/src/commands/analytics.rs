use serde_json::Value;
use sufra_core::analytics::CookingAnalyticsEngine;
use sufra_core::catalog::FeaturedCatalog;

use crate::commands::{build_runtime, load_config, open_store, CommandResult};

pub fn run(user_id: &str, is_demo_user: bool, advanced: bool) -> CommandResult {
    let user_id = user_id.trim();
    if user_id.is_empty() && !is_demo_user {
        return CommandResult::failure("analytics", "usage", "--user must not be empty", 64);
    }

    let config = match load_config("analytics") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let catalog = match FeaturedCatalog::load_or_builtin(config.catalog.path.as_deref()) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("analytics", "catalog", error.to_string(), 2);
        }
    };
    let runtime = match build_runtime("analytics") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let store = open_store(&config).await?;
        let engine = CookingAnalyticsEngine::new(store, catalog);

        let (total_recipes, data) = if advanced {
            let report = engine.compute_advanced_analytics(user_id, is_demo_user).await;
            (report.summary.total_recipes, serde_json::to_value(&report))
        } else {
            let report = engine.compute_cooking_analytics(user_id, is_demo_user).await;
            (report.total_recipes, serde_json::to_value(&report))
        };

        engine.store().pool().close().await;
        let data = data.map_err(|error| ("serialization", error.to_string(), 7u8))?;
        Ok::<(usize, Value), (&'static str, String, u8)>((total_recipes, data))
    });

    match result {
        Ok((total_recipes, data)) => {
            let subject = if is_demo_user {
                "demo profile".to_string()
            } else {
                format!("user `{user_id}`")
            };
            CommandResult::success_with_data(
                "analytics",
                format!("computed analytics for {subject} over {total_recipes} saved recipes"),
                Some(data),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("analytics", error_class, message, exit_code)
        }
    }
}
