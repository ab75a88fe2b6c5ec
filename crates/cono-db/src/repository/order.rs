//! # Order Repository
//!
//! Database operations for cone orders.
//!
//! ## What Gets Stored
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stored vs Derived                                    │
//! │                                                                         │
//! │  cone_orders row                      derived on every read             │
//! │  ──────────────────                   ─────────────────────             │
//! │  customer   "Alice"                                                     │
//! │  variant    "Carnivore"     ──────►   final_price_cents                 │
//! │  size       "Medium"        pricing   discount_cents                    │
//! │  toppings   ["bacon", ...]  engine    final_ingredients                 │
//! │  ordered_on 2026-08-23                                                  │
//! │                                                                         │
//! │  Prices are NEVER persisted. A catalog change reprices all              │
//! │  history automatically on the next read.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Toppings Column
//! Stored as a JSON array in a TEXT column. SQLite has no array type and
//! the list is only ever read whole, so a join table would buy nothing.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use cono_core::{ConeOrder, NewConeOrder};

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row shape for `cone_orders`. The toppings column is JSON text;
/// decoding it is the only way this row can fail to become a [`ConeOrder`].
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer: String,
    variant: String,
    size: String,
    toppings: String,
    ordered_on: NaiveDate,
}

impl TryFrom<OrderRow> for ConeOrder {
    type Error = DbError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let toppings: Vec<String> = serde_json::from_str(&row.toppings).map_err(|e| {
            DbError::InvalidData(format!("order {}: toppings column: {}", row.id, e))
        })?;

        Ok(ConeOrder {
            id: row.id,
            customer: row.customer,
            variant: row.variant,
            size: row.size,
            toppings,
            ordered_on: row.ordered_on,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for cone order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = OrderRepository::new(pool);
///
/// let order = repo.insert(&new_order).await?;
/// let found = repo.get_by_id(order.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// `ordered_on` is stamped with today's date; callers never supply it.
    ///
    /// ## Returns
    /// The stored order, including its generated id.
    pub async fn insert(&self, order: &NewConeOrder) -> DbResult<ConeOrder> {
        debug!(customer = %order.customer, variant = %order.variant, "Inserting order");

        let toppings_json = serde_json::to_string(&order.toppings)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let ordered_on = Utc::now().date_naive();

        let result = sqlx::query(
            r#"
            INSERT INTO cone_orders (customer, variant, size, toppings, ordered_on)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&order.customer)
        .bind(&order.variant)
        .bind(&order.size)
        .bind(&toppings_json)
        .bind(ordered_on)
        .execute(&self.pool)
        .await?;

        Ok(ConeOrder {
            id: result.last_insert_rowid(),
            customer: order.customer.clone(),
            variant: order.variant.clone(),
            size: order.size.clone(),
            toppings: order.toppings.clone(),
            ordered_on,
        })
    }

    /// Gets an order by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(ConeOrder))` - Order found
    /// * `Ok(None)` - Order not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<ConeOrder>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer, variant, size, toppings, ordered_on
            FROM cone_orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ConeOrder::try_from).transpose()
    }

    /// Lists all orders, newest first.
    pub async fn list(&self) -> DbResult<Vec<ConeOrder>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer, variant, size, toppings, ordered_on
            FROM cone_orders
            ORDER BY ordered_on DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ConeOrder::try_from).collect()
    }

    /// Updates an existing order's editable fields.
    ///
    /// `ordered_on` is immutable: the order keeps its original date no
    /// matter how often its contents change.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn update(&self, order: &ConeOrder) -> DbResult<()> {
        debug!(id = order.id, "Updating order");

        let toppings_json = serde_json::to_string(&order.toppings)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE cone_orders SET
                customer = ?2,
                variant = ?3,
                size = ?4,
                toppings = ?5
            WHERE id = ?1
            "#,
        )
        .bind(order.id)
        .bind(&order.customer)
        .bind(&order.variant)
        .bind(&order.size)
        .bind(&toppings_json)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ConeOrder", order.id.to_string()));
        }

        Ok(())
    }

    /// Deletes an order.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting order");

        let result = sqlx::query("DELETE FROM cone_orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ConeOrder", id.to_string()));
        }

        Ok(())
    }

    /// Counts total orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cone_orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
