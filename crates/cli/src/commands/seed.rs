use sufra_db::fixtures::UserSeedInfo;
use sufra_db::DemoSeedDataset;

use crate::commands::{build_runtime, load_config, open_store, CommandResult};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let store = open_store(&config).await?;

        let seed_result = DemoSeedDataset::load(&store)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;
        let verification = DemoSeedDataset::verify(&store)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result = if verification.all_present {
            Ok(seed_result.users_seeded)
        } else {
            Err(("seed_verification", verification_message(&verification.checks), 6u8))
        };

        store.pool().close().await;
        run_result
    });

    match result {
        Ok(users) => CommandResult::success("seed", seed_message(&users)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(users: &[UserSeedInfo]) -> String {
    let lines: Vec<String> = users
        .iter()
        .map(|user| {
            format!(
                "  - {}: {} favorites, {} collections, {} distinct recipes",
                user.user_id, user.favorites, user.collections, user.distinct_recipes
            )
        })
        .collect();
    format!("demo seed dataset loaded:\n{}", lines.join("\n"))
}

fn verification_message(checks: &[(&'static str, bool)]) -> String {
    let failed_checks = checks
        .iter()
        .filter_map(|(check, passed)| (!passed).then_some(*check))
        .collect::<Vec<_>>();
    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for checks: {}", failed_checks.join(", "))
    }
}
