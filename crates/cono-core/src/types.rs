//! # Domain Types
//!
//! Core domain types used throughout Cono Orders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ConeOrder     │   │  PricedResult   │   │      Size       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │ final_price_cents│  │  Small          │       │
//! │  │  customer       │   │ discount_cents  │   │  Medium ◄─ default│     │
//! │  │  variant (raw)  │   │ final_ingredients│  │  Large          │       │
//! │  │  size (raw)     │   │ size            │   └─────────────────┘       │
//! │  │  toppings (raw) │   │ variant_kind    │                             │
//! │  │  ordered_on     │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ConeOrder stores RAW inputs only; PricedResult is recomputed from     │
//! │  them on every read and never persisted.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Size
// =============================================================================

/// The three cone sizes the catalog prices.
///
/// Sizes travel the system as raw strings (`"Small"` / `"Medium"` /
/// `"Large"`); this enum exists for the price-table lookup and for the
/// strict validation surface. Anything unrecognized prices as Medium —
/// a fallback policy, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// All sizes, in ascending price order.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Strict lookup by catalog name. `None` for anything else.
    pub fn from_name(name: &str) -> Option<Size> {
        match name {
            "Small" => Some(Size::Small),
            "Medium" => Some(Size::Medium),
            "Large" => Some(Size::Large),
            _ => None,
        }
    }

    /// Lenient lookup: unknown names fall back to Medium.
    ///
    /// ## Example
    /// ```rust
    /// use cono_core::types::Size;
    ///
    /// assert_eq!(Size::from_name_or_medium("Large"), Size::Large);
    /// assert_eq!(Size::from_name_or_medium("Huge"), Size::Medium);
    /// ```
    pub fn from_name_or_medium(name: &str) -> Size {
        Size::from_name(name).unwrap_or_default()
    }

    /// The catalog name of this size.
    pub const fn name(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
        }
    }
}

/// Medium is the pricing fallback for unrecognized sizes.
impl Default for Size {
    fn default() -> Self {
        Size::Medium
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Priced Result
// =============================================================================

/// The immutable output of one pricing computation.
///
/// This is the only value crossing the core boundary outward. It is derived
/// fresh from the (variant, size, toppings) triple on every call — never
/// cached, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedResult {
    /// Final price in cents: base + toppings - discount. Exactly two
    /// decimal places by construction.
    pub final_price_cents: i64,

    /// The combo discount that was taken, in cents (0 when none applied).
    pub discount_cents: i64,

    /// Final ingredients, unique, in first-insertion order (base list
    /// first, then applied toppings).
    pub final_ingredients: Vec<String>,

    /// The size string as the caller supplied it (echoed, not normalized).
    pub size: String,

    /// Kind tag of the variant that produced this cone
    /// ("CarnivoreCone" / "VegetarianCone" / "HealthyCone").
    pub variant_kind: String,
}

impl PricedResult {
    /// Returns the final price as a Money type.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }

    /// Returns the applied discount as a Money type.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Whether the combo discount fired for this cone.
    #[inline]
    pub fn has_discount(&self) -> bool {
        self.discount_cents > 0
    }
}

// =============================================================================
// Cone Order
// =============================================================================

/// A stored customer order: the raw request, nothing computed.
///
/// Prices and ingredient lists are deliberately absent — they are recomputed
/// from these fields on every read, so a catalog change reprices history
/// instead of serving stale numbers. `variant` and `size` stay raw strings:
/// rows written by an older catalog must still load (and then degrade at
/// the serialization boundary rather than fail).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConeOrder {
    /// Store-assigned identifier (auto-increment, ≥ 1). 0 marks an order
    /// that has not been persisted yet.
    pub id: i64,

    /// Customer display name.
    pub customer: String,

    /// Requested variant, as submitted.
    pub variant: String,

    /// Requested size, as submitted.
    pub size: String,

    /// Requested toppings, as submitted (duplicates preserved — each
    /// occurrence is priced).
    pub toppings: Vec<String>,

    /// Date the order was recorded (assigned at insert).
    #[ts(as = "String")]
    pub ordered_on: NaiveDate,
}

impl ConeOrder {
    /// Number of topping entries as submitted (duplicates counted).
    #[inline]
    pub fn total_toppings(&self) -> usize {
        self.toppings.len()
    }
}

// =============================================================================
// New Cone Order
// =============================================================================

/// The insert shape for an order: everything the store assigns is absent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewConeOrder {
    pub customer: String,
    pub variant: String,
    pub size: String,
    pub toppings: Vec<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_from_name() {
        assert_eq!(Size::from_name("Small"), Some(Size::Small));
        assert_eq!(Size::from_name("Medium"), Some(Size::Medium));
        assert_eq!(Size::from_name("Large"), Some(Size::Large));
        assert_eq!(Size::from_name("small"), None);
        assert_eq!(Size::from_name("Huge"), None);
        assert_eq!(Size::from_name(""), None);
    }

    #[test]
    fn test_size_fallback_is_medium() {
        assert_eq!(Size::from_name_or_medium("Huge"), Size::Medium);
        assert_eq!(Size::from_name_or_medium(""), Size::Medium);
        assert_eq!(Size::from_name_or_medium("Large"), Size::Large);
        assert_eq!(Size::default(), Size::Medium);
    }

    #[test]
    fn test_size_names_round_trip() {
        for size in Size::ALL {
            assert_eq!(Size::from_name(size.name()), Some(size));
            assert_eq!(format!("{}", size), size.name());
        }
    }

    #[test]
    fn test_priced_result_accessors() {
        let result = PricedResult {
            final_price_cents: 2700,
            discount_cents: 300,
            final_ingredients: vec!["ground_meat".to_string()],
            size: "Medium".to_string(),
            variant_kind: "CarnivoreCone".to_string(),
        };
        assert_eq!(result.final_price(), Money::from_cents(2700));
        assert_eq!(result.discount(), Money::from_cents(300));
        assert!(result.has_discount());

        let plain = PricedResult {
            discount_cents: 0,
            ..result
        };
        assert!(!plain.has_discount());
    }

    #[test]
    fn test_total_toppings_counts_duplicates() {
        let order = ConeOrder {
            id: 1,
            customer: "Ana".to_string(),
            variant: "Carnivore".to_string(),
            size: "Medium".to_string(),
            toppings: vec![
                "bacon".to_string(),
                "bacon".to_string(),
                "fries".to_string(),
            ],
            ordered_on: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        };
        assert_eq!(order.total_toppings(), 3);
    }
}
