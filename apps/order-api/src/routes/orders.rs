//! # Order Routes
//!
//! CRUD and pricing endpoints for cone orders.
//!
//! ## Pricing On Read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every response that shows money runs the pricing engine:               │
//! │                                                                         │
//! │  GET /orders ──► repo.list() ──► price_order() per row ──► JSON         │
//! │                                                                         │
//! │  Stored rows hold only the order fields. If a stored variant has        │
//! │  left the catalog, the row still renders — price 0, no ingredients,     │
//! │  GenericCone — and an ERROR_PRICING event records why.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use cono_core::validation::{
    validate_customer, validate_size, validate_toppings, validate_variant,
};
use cono_core::{variant, ConeOrder, LogEntry, LogQuery, NewConeOrder, OperationKind, PricedResult};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body for `POST /orders` and `PUT /orders/{id}`.
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub customer: String,
    pub variant: String,
    pub size: String,
    /// Omitted toppings mean a plain base cone.
    #[serde(default)]
    pub toppings: Vec<String>,
}

/// One order as it appears in listings and create responses.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer: String,
    pub variant: String,
    pub size: String,
    pub toppings: Vec<String>,
    pub ordered_on: NaiveDate,
    pub final_price_cents: i64,
    pub discount_cents: i64,
    pub final_ingredients: Vec<String>,
}

/// Single-order view with derived extras.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub id: i64,
    pub customer: String,
    pub variant: String,
    /// Kind tag of the priced cone (`CarnivoreCone`, ..., `GenericCone`).
    pub cone_type: String,
    pub size: String,
    /// Requested count, duplicates included.
    pub total_toppings: usize,
    pub toppings: Vec<String>,
    pub ordered_on: NaiveDate,
    pub final_price_cents: i64,
    pub discount_cents: i64,
    pub has_discount: bool,
    pub final_ingredients: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub total: usize,
    pub orders: Vec<OrderResponse>,
}

/// Full pricing breakdown for one order, trace included.
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub order_id: i64,
    pub customer: String,
    pub result: PricedResult,
    /// Operation log entries recorded for this order, oldest first.
    pub debug_logs: Vec<LogEntry>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Validates an intake payload into a storable order.
fn validate_payload(payload: &OrderPayload) -> Result<NewConeOrder, ApiError> {
    let customer = validate_customer(&payload.customer)?;
    validate_variant(&payload.variant)?;
    validate_size(&payload.size)?;
    validate_toppings(&payload.toppings)?;

    Ok(NewConeOrder {
        customer,
        variant: payload.variant.clone(),
        size: payload.size.clone(),
        toppings: payload.toppings.clone(),
    })
}

/// Prices a stored order, degrading to the zero-priced default when the
/// stored variant is no longer priceable.
///
/// ## Degradation Contract
/// A broken row must not break a listing. On failure this returns price 0,
/// no ingredients, and the `GenericCone` tag, and records an
/// `ERROR_PRICING` event carrying the error text — the only place that
/// event kind is ever emitted.
fn priced_or_default(state: &AppState, order: &ConeOrder) -> PricedResult {
    match state
        .pricer
        .price_order(&order.variant, &order.size, &order.toppings, order.id)
    {
        Ok(result) => result,
        Err(e) => {
            warn!(order_id = order.id, error = %e, "pricing degraded to default");
            state.oplog.append(
                OperationKind::ErrorPricing,
                order.id,
                json!({ "error": e.to_string() }),
            );
            PricedResult {
                final_price_cents: 0,
                discount_cents: 0,
                final_ingredients: Vec::new(),
                size: order.size.clone(),
                variant_kind: variant::kind_tag_or_generic(&order.variant).to_string(),
            }
        }
    }
}

fn order_response(order: ConeOrder, priced: PricedResult) -> OrderResponse {
    OrderResponse {
        id: order.id,
        customer: order.customer,
        variant: order.variant,
        size: order.size,
        toppings: order.toppings,
        ordered_on: order.ordered_on,
        final_price_cents: priced.final_price_cents,
        discount_cents: priced.discount_cents,
        final_ingredients: priced.final_ingredients,
    }
}

fn detail_response(order: ConeOrder, priced: PricedResult) -> OrderDetailResponse {
    OrderDetailResponse {
        id: order.id,
        customer: order.customer,
        variant: order.variant,
        cone_type: priced.variant_kind,
        size: order.size,
        total_toppings: order.toppings.len(),
        toppings: order.toppings,
        ordered_on: order.ordered_on,
        final_price_cents: priced.final_price_cents,
        discount_cents: priced.discount_cents,
        has_discount: priced.discount_cents > 0,
        final_ingredients: priced.final_ingredients,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /orders` — creates an order and returns it priced.
///
/// ## Validation
/// Intake is strict: the customer name must be present and bounded, and
/// variant, size, and every topping must be catalog entries. The lenient
/// fallbacks (Medium, skipped toppings) exist for stored history, never
/// for new rows.
///
/// ## Example
/// ```bash
/// curl -s -X POST localhost:8080/orders \
///   -H 'content-type: application/json' \
///   -d '{"customer":"Alice","variant":"Carnivore","size":"Medium",
///        "toppings":["cheese_extra","fries","bacon"]}'
/// ```
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let new_order = validate_payload(&payload)?;
    let order = state.db.orders().insert(&new_order).await?;
    let priced = priced_or_default(&state, &order);

    Ok((StatusCode::CREATED, Json(order_response(order, priced))))
}

/// `GET /orders` — lists every order, newest first, each one priced.
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let orders = state.db.orders().list().await?;
    let orders: Vec<OrderResponse> = orders
        .into_iter()
        .map(|order| {
            let priced = priced_or_default(&state, &order);
            order_response(order, priced)
        })
        .collect();

    Ok(Json(ListOrdersResponse {
        total: orders.len(),
        orders,
    }))
}

/// `GET /orders/{id}` — one order with derived extras.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let order = state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("ConeOrder", id))?;
    let priced = priced_or_default(&state, &order);

    Ok(Json(detail_response(order, priced)))
}

/// `PUT /orders/{id}` — full replace of the editable fields.
///
/// The payload is validated exactly like a create; `ordered_on` keeps the
/// original date.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderPayload>,
) -> Result<Json<OrderDetailResponse>, ApiError> {
    let existing = state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("ConeOrder", id))?;
    let validated = validate_payload(&payload)?;

    let order = ConeOrder {
        id: existing.id,
        customer: validated.customer,
        variant: validated.variant,
        size: validated.size,
        toppings: validated.toppings,
        ordered_on: existing.ordered_on,
    };
    state.db.orders().update(&order).await?;
    let priced = priced_or_default(&state, &order);

    Ok(Json(detail_response(order, priced)))
}

/// `DELETE /orders/{id}`
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.orders().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /orders/{id}/calculation` — reprices the order and returns the
/// result together with every log entry recorded for it.
///
/// The reprice happens first, so the trace always ends with the events of
/// the computation being reported.
pub async fn get_calculation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CalculationResponse>, ApiError> {
    let order = state
        .db
        .orders()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("ConeOrder", id))?;
    let result = priced_or_default(&state, &order);

    let debug_logs = state.oplog.query(&LogQuery {
        order_id: Some(order.id),
        kind: None,
        limit: None,
    });

    Ok(Json(CalculationResponse {
        order_id: order.id,
        customer: order.customer,
        result,
        debug_logs,
    }))
}
