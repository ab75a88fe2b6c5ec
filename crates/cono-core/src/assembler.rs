//! # Cone Assembler
//!
//! Step-by-step construction of a priced cone. Every observable step is
//! mirrored into the [`OperationLog`](crate::oplog::OperationLog).
//!
//! ## Assembly Pipeline
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     Cone Assembly Pipeline                       │
//! │                                                                  │
//! │   Variant + Size ──► new() ───────────► base price, base         │
//! │                       │                 ingredients              │
//! │                       ▼                                          │
//! │   requested list ──► add_toppings() ──► price += each catalog    │
//! │                       │                 hit, ingredient added    │
//! │                       │                 once, unknowns skipped   │
//! │                       ▼                                          │
//! │                      apply_combo_discount()                      │
//! │                       │                 10% off when ≥3 extra    │
//! │                       │                 catalog toppings         │
//! │                       ▼                                          │
//! │                      finalize() ──────► PricedResult             │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::json;
use tracing::debug;

use crate::money::Money;
use crate::oplog::{OperationKind, OperationLog};
use crate::toppings;
use crate::types::{PricedResult, Size};
use crate::variant::Variant;

/// An in-progress cone being priced.
///
/// ## Invariants
/// - `ingredients` is duplicate-free and keeps first-insertion order
/// - `price` only moves through catalog additions and the combo discount
/// - The size string is kept verbatim for echoing; pricing resolved it
///   through [`Size::from_name_or_medium`] exactly once, in `new()`
#[derive(Debug, Clone)]
pub struct ConeAssembler {
    variant: Variant,
    size: String,
    price: Money,
    discount: Money,
    ingredients: Vec<String>,
    order_id: i64,
    log: OperationLog,
}

impl ConeAssembler {
    /// Starts an assembly from the variant's base recipe.
    ///
    /// Records a `CREATE_BASE_CONE` event carrying the resolved base price
    /// and ingredient list. An unrecognized size prices as Medium.
    pub fn new(variant: Variant, size: &str, order_id: i64, log: OperationLog) -> Self {
        let base_price = variant.base_price(Size::from_name_or_medium(size));
        let ingredients: Vec<String> = variant
            .base_ingredients()
            .iter()
            .map(|ingredient| ingredient.to_string())
            .collect();

        log.append(
            OperationKind::CreateBaseCone,
            order_id,
            json!({
                "variant": variant.name(),
                "size": size,
                "base_price_cents": base_price.cents(),
                "base_ingredients": ingredients,
            }),
        );

        ConeAssembler {
            variant,
            size: size.to_string(),
            price: base_price,
            discount: Money::zero(),
            ingredients,
            order_id,
            log,
        }
    }

    /// Applies one requested topping.
    ///
    /// ## Behavior
    /// - Catalog hit: price goes up by the topping price; the ingredient is
    ///   added unless already present; an `ADD_TOPPING` event is recorded
    /// - Catalog miss: nothing changes and nothing is recorded
    /// - Requesting the same topping twice charges twice but lists the
    ///   ingredient once
    pub fn add_topping(&mut self, name: &str) {
        let Some(price) = toppings::topping_price(name) else {
            debug!(topping = %name, "unknown topping skipped");
            return;
        };

        self.price += price;
        if !self.ingredients.iter().any(|ingredient| ingredient == name) {
            self.ingredients.push(name.to_string());
        }

        self.log.append(
            OperationKind::AddTopping,
            self.order_id,
            json!({
                "topping": name,
                "price_cents": price.cents(),
            }),
        );
    }

    /// Applies every requested topping, in request order.
    pub fn add_toppings(&mut self, toppings: &[String]) {
        for topping in toppings {
            self.add_topping(topping);
        }
    }

    /// Applies the combo discount if the cone qualifies.
    ///
    /// ## Rules
    /// - Qualifies when at least [`COMBO_TOPPING_THRESHOLD`](crate::COMBO_TOPPING_THRESHOLD)
    ///   ingredients are *extra* catalog toppings (see [`extra_topping_count`](Self::extra_topping_count))
    /// - Discount is [`COMBO_DISCOUNT_BPS`](crate::COMBO_DISCOUNT_BPS) of the
    ///   post-topping total, subtracted from the price
    /// - Records an `APPLY_DISCOUNT` event with the amount and reason
    pub fn apply_combo_discount(&mut self) {
        if self.extra_topping_count() < crate::COMBO_TOPPING_THRESHOLD {
            return;
        }

        let discount = self.price.percentage(crate::COMBO_DISCOUNT_BPS);
        self.price -= discount;
        self.discount = discount;

        self.log.append(
            OperationKind::ApplyDiscount,
            self.order_id,
            json!({
                "discount_cents": discount.cents(),
                "reason": crate::COMBO_DISCOUNT_REASON,
            }),
        );
    }

    /// Number of current ingredients that are catalog toppings *and* not
    /// part of the variant's base recipe.
    ///
    /// A requested topping that happens to be a base ingredient (tomato on
    /// a Vegetarian cone) is charged normally but never moves this count —
    /// the combo discount rewards genuinely extra toppings.
    pub fn extra_topping_count(&self) -> usize {
        let base = self.variant.base_ingredients();
        self.ingredients
            .iter()
            .filter(|ingredient| toppings::is_topping(ingredient))
            .filter(|ingredient| !base.contains(&ingredient.as_str()))
            .count()
    }

    /// Current running price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Discount applied so far (zero until the combo rule fires).
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Current ingredient list, first-insertion order.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Consumes the assembly into its final result and records a
    /// `CONE_COMPLETED` event carrying that result.
    pub fn finalize(self) -> PricedResult {
        let ConeAssembler {
            variant,
            size,
            price,
            discount,
            ingredients,
            order_id,
            log,
        } = self;

        let result = PricedResult {
            final_price_cents: price.cents(),
            discount_cents: discount.cents(),
            final_ingredients: ingredients,
            size,
            variant_kind: variant.kind_tag().to_string(),
        };

        log.append(
            OperationKind::ConeCompleted,
            order_id,
            serde_json::to_value(&result).unwrap_or_default(),
        );

        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oplog::LogQuery;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_new_seeds_base_recipe() {
        let log = OperationLog::new();
        let cone = ConeAssembler::new(Variant::Carnivore, "Medium", 1, log.clone());

        assert_eq!(cone.price(), Money::from_cents(2000));
        assert_eq!(
            cone.ingredients(),
            &["ground_meat", "onion", "special_sauce", "cone_bread"]
        );

        let created = log.query(&LogQuery {
            kind: Some(OperationKind::CreateBaseCone),
            ..LogQuery::default()
        });
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].details["base_price_cents"], 2000);
        assert_eq!(created[0].details["size"], "Medium");
    }

    #[test]
    fn test_unknown_size_prices_as_medium() {
        let log = OperationLog::new();
        let cone = ConeAssembler::new(Variant::Carnivore, "Huge", 1, log);
        assert_eq!(cone.price(), Money::from_cents(2000));
    }

    #[test]
    fn test_add_topping_prices_and_lists_once() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Carnivore, "Small", 1, log.clone());
        cone.add_topping("bacon");

        assert_eq!(cone.price(), Money::from_cents(1500 + 500));
        assert!(cone.ingredients().contains(&"bacon".to_string()));

        let added = log.query(&LogQuery {
            kind: Some(OperationKind::AddTopping),
            ..LogQuery::default()
        });
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].details["topping"], "bacon");
        assert_eq!(added[0].details["price_cents"], 500);
    }

    #[test]
    fn test_duplicate_topping_charged_twice_listed_once() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Carnivore, "Small", 1, log);
        cone.add_toppings(&strings(&["bacon", "bacon"]));

        assert_eq!(cone.price(), Money::from_cents(1500 + 500 + 500));
        let bacon_count = cone
            .ingredients()
            .iter()
            .filter(|ingredient| ingredient.as_str() == "bacon")
            .count();
        assert_eq!(bacon_count, 1);
    }

    #[test]
    fn test_unknown_topping_changes_nothing() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Healthy, "Small", 1, log.clone());
        let before = log.len();
        cone.add_topping("chocolate_chips");

        assert_eq!(cone.price(), Money::from_cents(1800));
        assert_eq!(cone.ingredients().len(), 7);
        assert_eq!(log.len(), before);
    }

    #[test]
    fn test_base_overlap_topping_is_charged_but_not_extra() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Vegetarian, "Small", 1, log);
        cone.add_topping("tomato");

        // Charged: 12.00 + 1.00. Not re-listed, not counted as extra.
        assert_eq!(cone.price(), Money::from_cents(1300));
        let tomato_count = cone
            .ingredients()
            .iter()
            .filter(|ingredient| ingredient.as_str() == "tomato")
            .count();
        assert_eq!(tomato_count, 1);
        assert_eq!(cone.extra_topping_count(), 0);

        cone.apply_combo_discount();
        assert_eq!(cone.price(), Money::from_cents(1300));
        assert!(cone.discount().is_zero());
    }

    #[test]
    fn test_combo_discount_at_three_extras() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Carnivore, "Medium", 1, log.clone());
        cone.add_toppings(&strings(&["cheese_extra", "fries", "bacon"]));
        assert_eq!(cone.price(), Money::from_cents(3000));
        assert_eq!(cone.extra_topping_count(), 3);

        cone.apply_combo_discount();
        assert_eq!(cone.discount(), Money::from_cents(300));
        assert_eq!(cone.price(), Money::from_cents(2700));

        let discounts = log.query(&LogQuery {
            kind: Some(OperationKind::ApplyDiscount),
            ..LogQuery::default()
        });
        assert_eq!(discounts.len(), 1);
        assert_eq!(discounts[0].details["discount_cents"], 300);
        assert_eq!(discounts[0].details["reason"], "combo_3_toppings");
    }

    #[test]
    fn test_no_discount_below_threshold() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Carnivore, "Medium", 1, log.clone());
        cone.add_toppings(&strings(&["cheese_extra", "fries"]));
        cone.apply_combo_discount();

        assert_eq!(cone.price(), Money::from_cents(2500));
        assert!(cone.discount().is_zero());
        let discounts = log.query(&LogQuery {
            kind: Some(OperationKind::ApplyDiscount),
            ..LogQuery::default()
        });
        assert!(discounts.is_empty());
    }

    #[test]
    fn test_finalize_reports_and_logs_the_result() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Carnivore, "Medium", 42, log.clone());
        cone.add_toppings(&strings(&["cheese_extra", "fries", "bacon"]));
        cone.apply_combo_discount();
        let result = cone.finalize();

        assert_eq!(result.final_price_cents, 2700);
        assert_eq!(result.discount_cents, 300);
        assert_eq!(result.size, "Medium");
        assert_eq!(result.variant_kind, "CarnivoreCone");
        assert_eq!(
            result.final_ingredients,
            vec![
                "ground_meat",
                "onion",
                "special_sauce",
                "cone_bread",
                "cheese_extra",
                "fries",
                "bacon"
            ]
        );

        let completed = log.query(&LogQuery {
            kind: Some(OperationKind::ConeCompleted),
            ..LogQuery::default()
        });
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].order_id, 42);
        assert_eq!(completed[0].details["final_price_cents"], 2700);
    }

    #[test]
    fn test_junk_toppings_leave_base_price() {
        let log = OperationLog::new();
        let mut cone = ConeAssembler::new(Variant::Healthy, "Small", 1, log);
        cone.add_toppings(&strings(&["junk", "more_junk"]));
        cone.apply_combo_discount();
        let result = cone.finalize();

        assert_eq!(result.final_price_cents, 1800);
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.final_ingredients.len(), 7);
    }
}
