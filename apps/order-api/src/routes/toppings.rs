//! # Topping Catalog Route
//!
//! Read-only view of the closed topping table, so clients can render the
//! picker from the same data the pricing engine charges against.

use axum::Json;
use serde::Serialize;

use cono_core::toppings::{self, CATALOG_VERSION, TOPPING_COUNT};

/// One catalog entry as served to clients.
#[derive(Debug, Serialize)]
pub struct ToppingEntry {
    pub name: String,
    pub price_cents: i64,
}

/// The full catalog response.
#[derive(Debug, Serialize)]
pub struct ToppingsResponse {
    /// Every topping, in catalog table order.
    pub available_toppings: Vec<ToppingEntry>,
    pub total_toppings: usize,
    /// Which table priced this response. Bumped whenever the catalog edits.
    pub catalog_version: u32,
}

/// `GET /toppings` — the whole catalog.
///
/// No filters, no paging: the table is 19 rows and closed at runtime, so
/// clients cache it per `catalog_version`.
pub async fn list_toppings() -> Json<ToppingsResponse> {
    let available_toppings: Vec<ToppingEntry> = toppings::TOPPING_PRICES
        .iter()
        .map(|(name, price)| ToppingEntry {
            name: name.to_string(),
            price_cents: price.cents(),
        })
        .collect();

    Json(ToppingsResponse {
        available_toppings,
        total_toppings: TOPPING_COUNT,
        catalog_version: CATALOG_VERSION,
    })
}
