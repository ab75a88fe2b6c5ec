//! # Pricing Engine
//!
//! The one entry point collaborators call to turn an order's raw fields
//! into a [`PricedResult`]. Drives the [`ConeAssembler`] pipeline end to
//! end and shares the [`OperationLog`] handle with it.
//!
//! ## Failure Contract
//! An unknown variant is the only fatal input: `price_order` returns
//! [`CoreError::UnsupportedVariant`] *before* recording anything, so a
//! failed computation leaves no partial trace. Callers that must always
//! produce a result (API responses, receipts) catch the error, substitute
//! the zero-priced default, and record `ERROR_PRICING` themselves.

use tracing::debug;

use crate::assembler::ConeAssembler;
use crate::error::CoreResult;
use crate::oplog::OperationLog;
use crate::types::PricedResult;
use crate::variant::Variant;

/// Stateless pricing front door. Cheap to clone — carries only the shared
/// log handle.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    log: OperationLog,
}

impl PricingEngine {
    /// Creates an engine recording into the given log.
    pub fn new(log: OperationLog) -> Self {
        PricingEngine { log }
    }

    /// The log this engine records into.
    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Prices one order.
    ///
    /// ## Pipeline
    /// 1. Resolve the variant (fatal if unknown — nothing is logged)
    /// 2. Seed the base cone (`CREATE_BASE_CONE`)
    /// 3. Apply each requested topping in order (`ADD_TOPPING` per hit)
    /// 4. Apply the combo discount if earned (`APPLY_DISCOUNT`)
    /// 5. Finalize (`CONE_COMPLETED`)
    ///
    /// Deterministic: the same inputs always produce the same result and
    /// the same event sequence.
    pub fn price_order(
        &self,
        variant: &str,
        size: &str,
        toppings: &[String],
        order_id: i64,
    ) -> CoreResult<PricedResult> {
        let variant = variant.parse::<Variant>()?;
        debug!(variant = %variant, size = %size, order_id = order_id, "pricing order");

        let mut cone = ConeAssembler::new(variant, size, order_id, self.log.clone());
        cone.add_toppings(toppings);
        cone.apply_combo_discount();
        Ok(cone.finalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::oplog::{LogQuery, OperationKind};
    use crate::types::Size;

    fn engine() -> PricingEngine {
        PricingEngine::new(OperationLog::new())
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_no_toppings_prices_exactly_at_base() {
        let engine = engine();
        for variant in Variant::ALL {
            for size in Size::ALL {
                let result = engine
                    .price_order(variant.name(), size.name(), &[], 1)
                    .unwrap();
                assert_eq!(
                    result.final_price_cents,
                    variant.base_price(size).cents(),
                    "base price mismatch for {} {}",
                    variant.name(),
                    size.name()
                );
                assert_eq!(result.discount_cents, 0);
                assert_eq!(
                    result.final_ingredients,
                    variant.base_ingredients().to_vec()
                );
            }
        }
    }

    #[test]
    fn test_unknown_variant_is_fatal_and_leaves_no_trace() {
        let engine = engine();
        let err = engine
            .price_order("Dessert", "Medium", &[], 1)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedVariant(name) if name == "Dessert"));
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_full_combo_example() {
        let engine = engine();
        let result = engine
            .price_order(
                "Carnivore",
                "Medium",
                &strings(&["cheese_extra", "fries", "bacon"]),
                7,
            )
            .unwrap();

        assert_eq!(result.final_price_cents, 2700);
        assert_eq!(result.discount_cents, 300);
        assert!(result.has_discount());
        assert_eq!(result.variant_kind, "CarnivoreCone");

        let events = engine.log().query(&LogQuery {
            order_id: Some(7),
            ..LogQuery::default()
        });
        let kinds: Vec<OperationKind> = events.iter().map(|event| event.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::CreateBaseCone,
                OperationKind::AddTopping,
                OperationKind::AddTopping,
                OperationKind::AddTopping,
                OperationKind::ApplyDiscount,
                OperationKind::ConeCompleted,
            ]
        );
    }

    #[test]
    fn test_unknown_size_falls_back_to_medium() {
        let engine = engine();
        let result = engine.price_order("Carnivore", "Huge", &[], 1).unwrap();
        assert_eq!(result.final_price_cents, 2000);
        // The raw size string is echoed back untouched.
        assert_eq!(result.size, "Huge");
    }

    #[test]
    fn test_pricing_is_deterministic() {
        let engine = engine();
        let toppings = strings(&["bacon", "fries", "mushrooms", "hot_sauce"]);
        let first = engine
            .price_order("Vegetarian", "Large", &toppings, 3)
            .unwrap();
        let second = engine
            .price_order("Vegetarian", "Large", &toppings, 3)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_engine_clones_share_the_log() {
        let engine = engine();
        let clone = engine.clone();
        clone.price_order("Healthy", "Small", &[], 9).unwrap();

        assert!(!engine.log().is_empty());
        let completed = engine.log().query(&LogQuery {
            kind: Some(OperationKind::ConeCompleted),
            ..LogQuery::default()
        });
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].order_id, 9);
    }
}
