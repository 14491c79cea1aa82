use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use sufra_cli::commands::halal::HalalTarget;
use sufra_cli::commands::{analytics, halal, migrate, seed};
use tempfile::TempDir;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("SUFRA_STORAGE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
    });
}

#[test]
fn migrate_returns_config_failure_for_non_sqlite_url() {
    with_env(&[("SUFRA_STORAGE_URL", "postgres://localhost/sufra")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    let dir = TempDir::new().expect("temp dir");
    let url = database_url(&dir);

    with_env(&[("SUFRA_STORAGE_URL", url.as_str())], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["status"], "ok");

        let message = first_payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("  - demoUser: 2 favorites, 1 collections, 4 distinct recipes"));
        assert!(
            message.contains("  - sample-cook: 3 favorites, 2 collections, 6 distinct recipes")
        );

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        assert_eq!(parse_payload(&second.output)["message"], first_payload["message"]);
    });
}

#[test]
fn analytics_reads_seeded_sample_user() {
    let dir = TempDir::new().expect("temp dir");
    let url = database_url(&dir);

    with_env(&[("SUFRA_STORAGE_URL", url.as_str())], || {
        assert_eq!(seed::run().exit_code, 0);

        let result = analytics::run("sample-cook", false, false);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "analytics");
        assert_eq!(payload["data"]["totalRecipes"], 6);
        assert_eq!(payload["data"]["difficultyBreakdown"].as_array().map(Vec::len), Some(3));
        assert!(payload["data"].get("recommendations").is_none());
    });
}

#[test]
fn advanced_analytics_for_demo_profile_includes_recommendations() {
    let dir = TempDir::new().expect("temp dir");
    let url = database_url(&dir);

    with_env(&[("SUFRA_STORAGE_URL", url.as_str())], || {
        assert_eq!(seed::run().exit_code, 0);

        let result = analytics::run("whoever", true, true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["summary"]["totalRecipes"], 4);
        let recommendations =
            payload["data"]["recommendations"].as_array().cloned().unwrap_or_default();
        assert!(!recommendations.is_empty());
        assert!(recommendations.len() <= 3);
    });
}

#[test]
fn analytics_for_unknown_user_is_empty_not_an_error() {
    with_env(&[("SUFRA_STORAGE_URL", "sqlite::memory:")], || {
        let result = analytics::run("nobody", false, true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["summary"]["totalRecipes"], 0);
        assert_eq!(payload["data"]["recommendations"][0]["type"], "onboarding");
        assert_eq!(payload["data"]["recommendations"][0]["confidence"], 1.0);
    });
}

#[test]
fn halal_ingredient_check_suggests_substitute() {
    let result = halal::run(HalalTarget::Ingredient("Pork Belly".to_string()));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["halal"], false);
    assert!(payload["data"]["substitute"].is_string());

    let clean = parse_payload(&halal::run(HalalTarget::Ingredient("chickpeas".to_string())).output);
    assert_eq!(clean["data"]["halal"], true);
    assert!(clean["data"]["substitute"].is_null());
}

#[test]
fn halal_file_check_reads_meal_record() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("meal.json");
    fs::write(
        &path,
        r#"{"strMeal":"Coq au Vin","strCategory":"Chicken","strIngredient1":"Chicken","strIngredient2":"Red Wine"}"#,
    )
    .expect("write meal record");

    let result = halal::run(HalalTarget::File(path));
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["data"]["recipe"], "Coq au Vin");
    assert_eq!(payload["data"]["halal"], false);
    assert_eq!(payload["data"]["flaggedTerms"][0], "wine");
}

#[test]
fn halal_file_check_reports_unreadable_input() {
    let dir = TempDir::new().expect("temp dir");
    let result = halal::run(HalalTarget::File(dir.path().join("missing.json")));

    assert_eq!(result.exit_code, 66);
    assert_eq!(parse_payload(&result.output)["error_class"], "input_read");
}

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("sufra.db").display())
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SUFRA_STORAGE_URL",
        "SUFRA_STORAGE_MAX_CONNECTIONS",
        "SUFRA_STORAGE_TIMEOUT_SECS",
        "SUFRA_SERVER_BIND_ADDRESS",
        "SUFRA_SERVER_PORT",
        "SUFRA_CATALOG_PATH",
        "SUFRA_LOGGING_LEVEL",
        "SUFRA_LOGGING_FORMAT",
        "SUFRA_LOG_LEVEL",
        "SUFRA_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    // Each in-memory connection is its own database.
    env::set_var("SUFRA_STORAGE_MAX_CONNECTIONS", "1");
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
