//! # HTTP Routes
//!
//! Route table and handlers for the Order API.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Order API Routes                               │
//! │                                                                         │
//! │  GET    /health                     liveness probe                      │
//! │                                                                         │
//! │  POST   /orders                     create (validated, priced)          │
//! │  GET    /orders                     list, newest first, priced          │
//! │  GET    /orders/{id}                detail view                         │
//! │  PUT    /orders/{id}                full update of raw fields           │
//! │  DELETE /orders/{id}                remove                              │
//! │  GET    /orders/{id}/calculation    pricing breakdown + trace           │
//! │                                                                         │
//! │  GET    /toppings                   the closed topping catalog          │
//! │                                                                         │
//! │  GET    /logs                       filtered operation-log read         │
//! │  POST   /logs/clear                 wipe the operation log              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod logs;
pub mod orders;
pub mod toppings;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Builds the application router over the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/orders", post(orders::create_order).get(orders::list_orders))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/{id}/calculation", get(orders::get_calculation))
        .route("/toppings", get(toppings::list_toppings))
        .route("/logs", get(logs::list_logs))
        .route("/logs/clear", post(logs::clear_logs))
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// `GET /health` — liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "cono-order-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use cono_core::OperationLog;
    use cono_db::{Database, DbConfig};

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db, OperationLog::new())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "cono-order-api");
    }

    #[tokio::test]
    async fn test_create_order_returns_computed_price() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Alice",
                    "variant": "Carnivore",
                    "size": "Medium",
                    "toppings": ["cheese_extra", "fries", "bacon"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        // 20.00 + 10.00 toppings - 10% combo = 27.00
        assert_eq!(body["final_price_cents"], 2700);
        assert_eq!(body["discount_cents"], 300);
        assert_eq!(
            body["final_ingredients"].as_array().unwrap().len(),
            4 + 3
        );
    }

    #[tokio::test]
    async fn test_create_order_rejects_invalid_topping() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Alice",
                    "variant": "Healthy",
                    "size": "Small",
                    "toppings": ["bacon", "gold_leaf"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("gold_leaf"));
    }

    #[tokio::test]
    async fn test_create_order_rejects_missing_customer() {
        let app = build_router(test_state().await);

        let response = app
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "  ",
                    "variant": "Healthy",
                    "size": "Small"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_order_is_404() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get("/orders/42")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_detail_view_carries_derived_fields() {
        let state = test_state().await;
        let app = build_router(state);

        let created = app
            .clone()
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Bob",
                    "variant": "Vegetarian",
                    "size": "Small",
                    "toppings": ["tomato"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let response = app.oneshot(get("/orders/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cone_type"], "VegetarianCone");
        assert_eq!(body["total_toppings"], 1);
        // 12.00 + 1.00, two toppings short of a combo.
        assert_eq!(body["final_price_cents"], 1300);
        assert_eq!(body["has_discount"], false);
    }

    #[tokio::test]
    async fn test_unpriceable_stored_order_degrades_to_default() {
        let state = test_state().await;

        // A row the API's validation would never let in.
        sqlx::query(
            "INSERT INTO cone_orders (customer, variant, size, toppings, ordered_on)
             VALUES ('Eve', 'Dessert', 'Medium', '[]', '2025-01-01')",
        )
        .execute(state.db.pool())
        .await
        .unwrap();

        let app = build_router(state.clone());
        let response = app.oneshot(get("/orders/1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["final_price_cents"], 0);
        assert_eq!(body["final_ingredients"], json!([]));
        assert_eq!(body["cone_type"], "GenericCone");

        let errors = state.oplog.query(&cono_core::LogQuery {
            kind: Some(cono_core::OperationKind::ErrorPricing),
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].order_id, 1);
    }

    #[tokio::test]
    async fn test_calculation_returns_trace_for_the_order() {
        let state = test_state().await;
        let app = build_router(state);

        app.clone()
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Cara",
                    "variant": "Carnivore",
                    "size": "Large",
                    "toppings": ["bacon"]
                }),
            ))
            .await
            .unwrap();

        let response = app.oneshot(get("/orders/1/calculation")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["order_id"], 1);
        assert_eq!(body["result"]["final_price_cents"], 3000);

        let kinds: Vec<&str> = body["debug_logs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["kind"].as_str().unwrap())
            .collect();
        assert!(kinds.contains(&"CREATE_BASE_CONE"));
        assert!(kinds.contains(&"ADD_TOPPING"));
        assert_eq!(kinds.last(), Some(&"CONE_COMPLETED"));
    }

    #[tokio::test]
    async fn test_toppings_catalog_endpoint() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get("/toppings")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_toppings"], 19);
        assert_eq!(body["catalog_version"], 1);

        let bacon = body["available_toppings"]
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["name"] == "bacon")
            .unwrap();
        assert_eq!(bacon["price_cents"], 500);
    }

    #[tokio::test]
    async fn test_logs_filters_and_rejects_bad_kind() {
        let state = test_state().await;
        let app = build_router(state);

        app.clone()
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Dan",
                    "variant": "Healthy",
                    "size": "Small",
                    "toppings": ["bacon", "fries"]
                }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get("/logs?operation_kind=add_topping"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["filtered_logs"], 2);
        // CREATE_BASE_CONE + 2x ADD_TOPPING + CONE_COMPLETED
        assert_eq!(body["total_logs"], 4);

        let response = app
            .oneshot(get("/logs?operation_kind=NOT_A_KIND"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logs_clear_reports_pre_clear_count() {
        let state = test_state().await;
        let app = build_router(state.clone());

        app.clone()
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Fay",
                    "variant": "Carnivore",
                    "size": "Small"
                }),
            ))
            .await
            .unwrap();
        let before = state.oplog.len();
        assert!(before > 0);

        let response = app
            .clone()
            .oneshot(post_json("/logs/clear", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cleared"], before);

        let response = app.oneshot(get("/logs")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["total_logs"], 0);
        assert_eq!(body["logs"], json!([]));
    }

    #[tokio::test]
    async fn test_update_and_delete_round_trip() {
        let app = build_router(test_state().await);

        app.clone()
            .oneshot(post_json(
                "/orders",
                json!({
                    "customer": "Gil",
                    "variant": "Carnivore",
                    "size": "Small"
                }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/orders/1")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "customer": "Gil",
                            "variant": "Vegetarian",
                            "size": "Large",
                            "toppings": ["mushrooms"]
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["cone_type"], "VegetarianCone");
        assert_eq!(body["final_price_cents"], 2200 + 250);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/orders/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get("/orders/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_orders_prices_every_row() {
        let app = build_router(test_state().await);

        for customer in ["Ana", "Ben"] {
            app.clone()
                .oneshot(post_json(
                    "/orders",
                    json!({
                        "customer": customer,
                        "variant": "Healthy",
                        "size": "Medium"
                    }),
                ))
                .await
                .unwrap();
        }

        let response = app.oneshot(get("/orders")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 2);
        // Newest first: Ben was inserted second.
        assert_eq!(body["orders"][0]["customer"], "Ben");
        for order in body["orders"].as_array().unwrap() {
            assert_eq!(order["final_price_cents"], 2300);
        }
    }
}
