use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use sufra_db::DbPool;

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
    featured_recipes: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub storage: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool, featured_recipes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { db_pool, featured_recipes })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = storage_check(&state.db_pool).await;
    let ready = storage.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "sufra-server runtime initialized".to_string(),
        },
        storage,
        catalog: HealthCheck {
            status: "ready",
            detail: format!("{} featured recipes loaded", state.featured_recipes),
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn storage_check(pool: &DbPool) -> HealthCheck {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM kv_store").fetch_one(pool).await {
        Ok(keys) => {
            HealthCheck { status: "ready", detail: format!("kv_store reachable ({keys} keys)") }
        }
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("kv_store query failed: {error}") }
        }
    }
}
