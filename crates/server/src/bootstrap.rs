use std::sync::Arc;

use sufra_core::catalog::{CatalogError, FeaturedCatalog};
use sufra_core::config::{AppConfig, ConfigError};
use sufra_core::storage::KeyValueStore;
use sufra_core::CookingAnalyticsEngine;
use sufra_db::{connect_with_config, migrations, DbPool, SqlKeyValueStore};
use thiserror::Error;
use tracing::info;

pub type SharedStore = Arc<dyn KeyValueStore>;
pub type SharedEngine = Arc<CookingAnalyticsEngine<SharedStore, FeaturedCatalog>>;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub engine: SharedEngine,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("featured catalog could not be loaded: {0}")]
    Catalog(#[from] CatalogError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = FeaturedCatalog::load_or_builtin(config.catalog.path.as_deref())?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        featured_recipes = catalog.len(),
        "featured catalog loaded"
    );

    let db_pool =
        connect_with_config(&config.storage).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let store: SharedStore = Arc::new(SqlKeyValueStore::new(db_pool.clone()));
    let engine = Arc::new(CookingAnalyticsEngine::new(store, catalog));

    Ok(Application { config, db_pool, engine })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sufra_core::config::{AppConfig, ConfigOverrides, LoadOptions};
    use sufra_core::storage::{KeyValueStore, StorageKey};
    use sufra_db::DemoSeedDataset;

    use crate::bootstrap::{bootstrap_with_config, Application, BootstrapError};

    async fn bootstrap(overrides: ConfigOverrides) -> Result<Application, BootstrapError> {
        let config = AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() })?;
        bootstrap_with_config(config).await
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_missing_catalog_file() {
        let result = bootstrap(ConfigOverrides {
            storage_url: Some("sqlite::memory:".to_string()),
            catalog_path: Some(PathBuf::from("/nonexistent/sufra-catalog.json")),
            ..ConfigOverrides::default()
        })
        .await;

        assert!(matches!(result, Err(BootstrapError::Catalog(_))));
    }

    #[tokio::test]
    async fn bootstrap_migrates_storage_and_serves_seeded_analytics() {
        let app = bootstrap(ConfigOverrides {
            storage_url: Some("sqlite::memory:".to_string()),
            ..ConfigOverrides::default()
        })
        .await
        .expect("bootstrap should succeed with an in-memory database");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("kv_store should exist after bootstrap");
        assert_eq!(table_count, 1);

        DemoSeedDataset::load(app.engine.store()).await.expect("seed demo data");
        assert!(app.engine.store().get(StorageKey::DEMO_USER).await.expect("read").is_some());

        let analytics = app.engine.compute_cooking_analytics("", true).await;
        assert_eq!(analytics.total_recipes, DemoSeedDataset::DEMO_DISTINCT_RECIPES);

        app.db_pool.close().await;
    }
}
