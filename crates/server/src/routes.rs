//! JSON API for the web client.
//!
//! Handlers are stateless over the shared analytics engine; every request gets
//! a fresh correlation id that is echoed back in error bodies.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sufra_core::domain::recipe::Recipe;
use sufra_core::errors::{ApplicationError, DomainError, InterfaceError};
use sufra_core::halal::{flagged_terms, is_halal, is_non_halal_ingredient, suggest_substitute};
use sufra_core::{AdvancedAnalyticsData, AnalyticsData};
use tracing::{info, warn};
use uuid::Uuid;

use crate::bootstrap::SharedEngine;

#[derive(Clone)]
pub struct ApiState {
    engine: SharedEngine,
}

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/api/users/{user_id}/analytics", get(cooking_analytics))
        .route("/api/users/{user_id}/analytics/advanced", get(advanced_analytics))
        .route("/api/halal/check", post(check_recipe))
        .route("/api/halal/ingredient", get(check_ingredient))
        .with_state(ApiState { engine })
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    demo: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientQuery {
    term: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCheckResponse {
    pub recipe: Option<String>,
    pub halal: bool,
    pub flagged_terms: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientCheckResponse {
    pub ingredient: String,
    pub halal: bool,
    pub substitute: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    correlation_id: String,
}

#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl ApiError {
    fn bad_request(correlation_id: &str, message: impl Into<String>) -> Self {
        let interface = ApplicationError::from(DomainError::InvariantViolation(message.into()))
            .into_interface(correlation_id);
        warn!(
            event_name = "server.request.rejected",
            correlation_id = %correlation_id,
            error = %interface,
            "request rejected"
        );
        Self(interface)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn cooking_analytics(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AnalyticsData>, ApiError> {
    let correlation_id = new_correlation_id();
    let Query(query) =
        query.map_err(|rejection| ApiError::bad_request(&correlation_id, rejection.body_text()))?;

    let analytics = state.engine.compute_cooking_analytics(&user_id, query.demo).await;
    info!(
        event_name = "server.request.completed",
        correlation_id = %correlation_id,
        route = "analytics",
        user_id = %user_id,
        demo = query.demo,
        total_recipes = analytics.total_recipes,
        "analytics served"
    );
    Ok(Json(analytics))
}

pub async fn advanced_analytics(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AdvancedAnalyticsData>, ApiError> {
    let correlation_id = new_correlation_id();
    let Query(query) =
        query.map_err(|rejection| ApiError::bad_request(&correlation_id, rejection.body_text()))?;

    let analytics = state.engine.compute_advanced_analytics(&user_id, query.demo).await;
    info!(
        event_name = "server.request.completed",
        correlation_id = %correlation_id,
        route = "analytics.advanced",
        user_id = %user_id,
        demo = query.demo,
        recommendations = analytics.recommendations.len(),
        "advanced analytics served"
    );
    Ok(Json(analytics))
}

/// Accepts a raw meal record; anything that is not a meal object is reported
/// as not halal rather than rejected.
pub async fn check_recipe(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecipeCheckResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let Json(record) =
        payload.map_err(|rejection| ApiError::bad_request(&correlation_id, rejection.body_text()))?;

    let recipe = Recipe::from_meal_record(&record);
    let response = RecipeCheckResponse {
        halal: is_halal(recipe.as_ref()),
        flagged_terms: recipe.as_ref().map(flagged_terms).unwrap_or_default(),
        recipe: recipe.map(|recipe| recipe.name),
    };
    info!(
        event_name = "server.request.completed",
        correlation_id = %correlation_id,
        route = "halal.check",
        halal = response.halal,
        "recipe checked"
    );
    Ok(Json(response))
}

pub async fn check_ingredient(
    query: Result<Query<IngredientQuery>, QueryRejection>,
) -> Result<Json<IngredientCheckResponse>, ApiError> {
    let correlation_id = new_correlation_id();
    let Query(query) =
        query.map_err(|rejection| ApiError::bad_request(&correlation_id, rejection.body_text()))?;

    let term = query.term.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(ApiError::bad_request(&correlation_id, "term must not be empty"));
    }

    let non_halal = is_non_halal_ingredient(term);
    let response = IngredientCheckResponse {
        ingredient: term.to_string(),
        halal: !non_halal,
        substitute: if non_halal { suggest_substitute(term) } else { None },
    };
    info!(
        event_name = "server.request.completed",
        correlation_id = %correlation_id,
        route = "halal.ingredient",
        halal = response.halal,
        "ingredient checked"
    );
    Ok(Json(response))
}

fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use sufra_core::{CookingAnalyticsEngine, FeaturedCatalog};
    use sufra_db::{fixtures::SAMPLE_USER_ID, DemoSeedDataset, InMemoryKeyValueStore};
    use tower::ServiceExt;

    use crate::bootstrap::SharedStore;
    use crate::routes::router;

    async fn seeded_router() -> Router {
        let store: SharedStore = Arc::new(InMemoryKeyValueStore::default());
        DemoSeedDataset::load(&store).await.expect("seed fixtures");
        router(Arc::new(CookingAnalyticsEngine::new(store, FeaturedCatalog::builtin())))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let payload = serde_json::from_slice(&bytes).expect("json body");
        (status, payload)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn analytics_route_serves_saved_recipe_summary() {
        let uri = format!("/api/users/{SAMPLE_USER_ID}/analytics");
        let (status, payload) = send(seeded_router().await, get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["totalRecipes"], 6);
        assert!(payload["favoriteCuisines"].as_array().is_some_and(|shares| !shares.is_empty()));
        assert_eq!(payload["weeklyProgress"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn advanced_route_reads_demo_profile_when_flagged() {
        let (status, payload) =
            send(seeded_router().await, get("/api/users/guest/analytics/advanced?demo=true")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["summary"]["totalRecipes"], DemoSeedDataset::DEMO_DISTINCT_RECIPES);
        assert!(payload["recommendations"].as_array().is_some_and(|recs| recs.len() <= 3));
    }

    #[tokio::test]
    async fn advanced_route_onboards_unknown_users() {
        let (status, payload) =
            send(seeded_router().await, get("/api/users/nobody/analytics/advanced")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["summary"]["totalRecipes"], 0);
        let recommendations = payload["recommendations"].as_array().expect("recommendations");
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0]["type"], "onboarding");
    }

    #[tokio::test]
    async fn malformed_demo_flag_is_a_bad_request_with_correlation_id() {
        let (status, payload) =
            send(seeded_router().await, get("/api/users/guest/analytics?demo=maybe")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["correlationId"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn halal_check_flags_blocklisted_ingredients() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/halal/check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"strMeal":"Coq au Vin","strCategory":"Chicken","strIngredient1":"Chicken","strIngredient2":"Red Wine"}"#,
            ))
            .expect("request");

        let (status, payload) = send(seeded_router().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["recipe"], "Coq au Vin");
        assert_eq!(payload["halal"], false);
        let flagged = payload["flaggedTerms"].as_array().expect("flagged terms");
        assert!(flagged.contains(&Value::from("wine")));
    }

    #[tokio::test]
    async fn halal_check_treats_non_meal_payloads_as_not_halal() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/halal/check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("[1, 2, 3]"))
            .expect("request");

        let (status, payload) = send(seeded_router().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["halal"], false);
        assert_eq!(payload["recipe"], Value::Null);
    }

    #[tokio::test]
    async fn halal_check_rejects_invalid_json() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/halal/check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");

        let (status, payload) = send(seeded_router().await, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            payload["error"],
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[tokio::test]
    async fn ingredient_check_suggests_substitute() {
        let (status, payload) =
            send(seeded_router().await, get("/api/halal/ingredient?term=Pork%20Belly")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["ingredient"], "Pork Belly");
        assert_eq!(payload["halal"], false);
        assert_eq!(payload["substitute"], "beef or lamb");
    }

    #[tokio::test]
    async fn ingredient_check_passes_clean_terms() {
        let (status, payload) =
            send(seeded_router().await, get("/api/halal/ingredient?term=chickpeas")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["halal"], true);
        assert_eq!(payload["substitute"], Value::Null);
    }

    #[tokio::test]
    async fn ingredient_check_requires_term() {
        let (status, _) = send(seeded_router().await, get("/api/halal/ingredient?term=%20")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(seeded_router().await, get("/api/halal/ingredient")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
