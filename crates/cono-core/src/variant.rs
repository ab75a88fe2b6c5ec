//! # Variant Catalog
//!
//! The closed set of cone variants and their per-size base prices and base
//! ingredient lists.
//!
//! ## Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Variant        Small    Medium   Large                     │
//! │              ─────────────  ───────  ───────  ───────                   │
//! │              Carnivore      $15.00   $20.00   $25.00                    │
//! │              Vegetarian     $12.00   $17.00   $22.00                    │
//! │              Healthy        $18.00   $23.00   $28.00                    │
//! │                                                                         │
//! │  Each variant carries a fixed base ingredient list; toppings are        │
//! │  layered on top by the assembler.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design
//! Variants are data, not types: one enum case per variant, each answering
//! pure lookups (`base_price`, `base_ingredients`, `kind_tag`). No trait
//! objects, no registry — the catalog is closed and compiled in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::Size;

/// Kind tag used when rendering a stored order whose variant no longer
/// parses. Presentation-level only — the pricing pipeline itself fails
/// fatally on an unknown variant.
pub const GENERIC_KIND_TAG: &str = "GenericCone";

// =============================================================================
// Variant
// =============================================================================

/// A cone variant: the base recipe a customer starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Variant {
    Carnivore,
    Vegetarian,
    Healthy,
}

impl Variant {
    /// All variants in the catalog.
    pub const ALL: [Variant; 3] = [Variant::Carnivore, Variant::Vegetarian, Variant::Healthy];

    /// Strict lookup by catalog name. `None` for anything else.
    pub fn from_name(name: &str) -> Option<Variant> {
        match name {
            "Carnivore" => Some(Variant::Carnivore),
            "Vegetarian" => Some(Variant::Vegetarian),
            "Healthy" => Some(Variant::Healthy),
            _ => None,
        }
    }

    /// The catalog name of this variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Variant::Carnivore => "Carnivore",
            Variant::Vegetarian => "Vegetarian",
            Variant::Healthy => "Healthy",
        }
    }

    /// Kind tag stamped onto results produced from this variant.
    pub const fn kind_tag(&self) -> &'static str {
        match self {
            Variant::Carnivore => "CarnivoreCone",
            Variant::Vegetarian => "VegetarianCone",
            Variant::Healthy => "HealthyCone",
        }
    }

    /// Base price for a given size.
    ///
    /// Callers holding a raw size string combine this with
    /// [`Size::from_name_or_medium`], which is what gives unknown sizes the
    /// variant's Medium price.
    ///
    /// ## Example
    /// ```rust
    /// use cono_core::types::Size;
    /// use cono_core::variant::Variant;
    ///
    /// let price = Variant::Carnivore.base_price(Size::from_name_or_medium("Huge"));
    /// assert_eq!(price.cents(), 2000); // Medium fallback
    /// ```
    pub const fn base_price(&self, size: Size) -> Money {
        let cents = match (self, size) {
            (Variant::Carnivore, Size::Small) => 1500,
            (Variant::Carnivore, Size::Medium) => 2000,
            (Variant::Carnivore, Size::Large) => 2500,
            (Variant::Vegetarian, Size::Small) => 1200,
            (Variant::Vegetarian, Size::Medium) => 1700,
            (Variant::Vegetarian, Size::Large) => 2200,
            (Variant::Healthy, Size::Small) => 1800,
            (Variant::Healthy, Size::Medium) => 2300,
            (Variant::Healthy, Size::Large) => 2800,
        };
        Money::from_cents(cents)
    }

    /// Base ingredients, in recipe order. These seed the assembler's
    /// ingredient set and are excluded from combo-discount counting.
    pub const fn base_ingredients(&self) -> &'static [&'static str] {
        match self {
            Variant::Carnivore => &["ground_meat", "onion", "special_sauce", "cone_bread"],
            Variant::Vegetarian => &[
                "cheese",
                "tomato",
                "lettuce",
                "onion",
                "vegetable_sauce",
                "cone_bread",
            ],
            Variant::Healthy => &[
                "quinoa",
                "avocado",
                "tomato",
                "lettuce",
                "carrot",
                "yogurt_sauce",
                "whole_wheat_bread",
            ],
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parse: the pipeline entry point. Unknown names are fatal.
impl FromStr for Variant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::from_name(s).ok_or_else(|| CoreError::UnsupportedVariant(s.to_string()))
    }
}

/// Kind tag for a raw variant string, falling back to [`GENERIC_KIND_TAG`]
/// when the string is not a catalog variant. Used when rendering stored
/// rows that must display something rather than fail.
pub fn kind_tag_or_generic(variant: &str) -> &'static str {
    Variant::from_name(variant).map_or(GENERIC_KIND_TAG, |v| v.kind_tag())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_prices_match_catalog() {
        let expected: [(Variant, [i64; 3]); 3] = [
            (Variant::Carnivore, [1500, 2000, 2500]),
            (Variant::Vegetarian, [1200, 1700, 2200]),
            (Variant::Healthy, [1800, 2300, 2800]),
        ];
        for (variant, prices) in expected {
            assert_eq!(variant.base_price(Size::Small).cents(), prices[0]);
            assert_eq!(variant.base_price(Size::Medium).cents(), prices[1]);
            assert_eq!(variant.base_price(Size::Large).cents(), prices[2]);
        }
    }

    #[test]
    fn test_unknown_size_prices_as_medium() {
        for variant in Variant::ALL {
            let fallback = variant.base_price(Size::from_name_or_medium("Huge"));
            assert_eq!(fallback, variant.base_price(Size::Medium));
        }
    }

    #[test]
    fn test_base_ingredients() {
        assert_eq!(
            Variant::Carnivore.base_ingredients(),
            &["ground_meat", "onion", "special_sauce", "cone_bread"]
        );
        assert_eq!(
            Variant::Vegetarian.base_ingredients(),
            &[
                "cheese",
                "tomato",
                "lettuce",
                "onion",
                "vegetable_sauce",
                "cone_bread"
            ]
        );
        assert_eq!(
            Variant::Healthy.base_ingredients(),
            &[
                "quinoa",
                "avocado",
                "tomato",
                "lettuce",
                "carrot",
                "yogurt_sauce",
                "whole_wheat_bread"
            ]
        );
    }

    #[test]
    fn test_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
            assert_eq!(variant.name().parse::<Variant>().ok(), Some(variant));
        }
    }

    #[test]
    fn test_unknown_variant_is_fatal() {
        let err = "Vegan".parse::<Variant>().unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVariant(ref v) if v == "Vegan"));
        assert_eq!(err.to_string(), "Unsupported cone variant: Vegan");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Variant::Carnivore.kind_tag(), "CarnivoreCone");
        assert_eq!(Variant::Vegetarian.kind_tag(), "VegetarianCone");
        assert_eq!(Variant::Healthy.kind_tag(), "HealthyCone");
        assert_eq!(kind_tag_or_generic("Healthy"), "HealthyCone");
        assert_eq!(kind_tag_or_generic("Mystery"), "GenericCone");
    }
}
