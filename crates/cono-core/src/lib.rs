//! # cono-core: Pure Pricing Logic for Cono Orders
//!
//! This crate is the **heart** of Cono Orders. It contains the entire
//! pricing ruleset as deterministic functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cono Orders Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      HTTP Clients                               │   │
//! │  │      order entry ──► pricing preview ──► trace inspection       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    order-api (axum)                             │   │
//! │  │     create/list/update orders, topping catalog, logs            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cono-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  variant  │  │ toppings  │  │ assembler │  │   oplog   │   │   │
//! │  │   │  + sizes  │  │  catalog  │  │ + pricing │  │   trace   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • DETERMINISTIC RESULTS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cono-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Size, PricedResult, ConeOrder)
//! - [`variant`] - Variant catalog: base prices per size, base ingredients
//! - [`toppings`] - Topping catalog: the closed id → price table
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`assembler`] - Step-by-step cone construction
//! - [`pricing`] - The engine collaborators call
//! - [`oplog`] - Append-only operation trace
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same order fields = same price, same event sequence
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here.
//!    The only shared state is the in-process [`OperationLog`]
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 4. **Lenient Where History Demands It**: Unknown sizes price as Medium
//!    and unknown toppings are skipped, so old rows always produce a result;
//!    only an unknown *variant* is fatal
//!
//! ## Example Usage
//!
//! ```rust
//! use cono_core::oplog::OperationLog;
//! use cono_core::pricing::PricingEngine;
//!
//! let engine = PricingEngine::new(OperationLog::new());
//!
//! // $20.00 Carnivore Medium plus a $5.00 bacon topping
//! let result = engine
//!     .price_order("Carnivore", "Medium", &["bacon".to_string()], 0)
//!     .unwrap();
//!
//! assert_eq!(result.final_price_cents, 2500);
//! assert!(!result.has_discount());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod assembler;
pub mod error;
pub mod money;
pub mod oplog;
pub mod pricing;
pub mod toppings;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cono_core::Money` instead of
// `use cono_core::money::Money`

pub use assembler::ConeAssembler;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use oplog::{LogEntry, LogQuery, OperationKind, OperationLog};
pub use pricing::PricingEngine;
pub use types::*;
pub use variant::Variant;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Extra-topping count at which the combo discount fires.
///
/// ## Business Reason
/// Three genuinely extra toppings make the order a "combo" worth rewarding.
/// Toppings that merely repeat a base ingredient never count toward this.
pub const COMBO_TOPPING_THRESHOLD: usize = 3;

/// Combo discount rate in basis points (1000 = 10%).
///
/// ## Why Basis Points?
/// Integer math end to end. Every catalog amount is a multiple of 50 cents,
/// so 10% of any reachable total is itself a whole number of cents and no
/// rounding ever shows up on a receipt.
pub const COMBO_DISCOUNT_BPS: u32 = 1000;

/// Reason string recorded with every `APPLY_DISCOUNT` event.
pub const COMBO_DISCOUNT_REASON: &str = "combo_3_toppings";

/// Maximum customer name length accepted at intake.
///
/// ## Business Reason
/// Matches the storage column width. Names longer than this are almost
/// always paste mistakes.
pub const MAX_CUSTOMER_LEN: usize = 100;
