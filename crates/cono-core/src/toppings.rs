//! # Topping Catalog
//!
//! The closed table of topping identifiers and their incremental prices.
//!
//! Two callers, two postures:
//! - The assembler consults it permissively: identifiers not in the table
//!   are silently ignored during pricing.
//! - The validation surface consults it strictly: order intake rejects any
//!   identifier outside the table before pricing ever runs.
//!
//! The table is not user-extensible at runtime. Bump [`CATALOG_VERSION`]
//! when editing it so API consumers can tell which table priced a response.

use crate::money::Money;

/// Version of the topping table below.
pub const CATALOG_VERSION: u32 = 1;

/// The catalog: topping identifier → incremental price.
///
/// Prices range from $0.50 (sauces) to $6.00 (grilled chicken); every entry
/// is a whole multiple of 50 cents, which is what keeps the 10% combo
/// discount exact in cents.
pub const TOPPING_PRICES: [(&str, Money); 19] = [
    ("cheese_extra", Money::from_cents(200)),
    ("fries", Money::from_cents(300)),
    ("sausage_extra", Money::from_cents(400)),
    ("bacon", Money::from_cents(500)),
    ("caramelized_onion", Money::from_cents(150)),
    ("mushrooms", Money::from_cents(250)),
    ("avocado", Money::from_cents(350)),
    ("tomato", Money::from_cents(100)),
    ("lettuce", Money::from_cents(50)),
    ("cucumber", Money::from_cents(100)),
    ("carrot", Money::from_cents(100)),
    ("grilled_chicken", Money::from_cents(600)),
    ("ground_meat", Money::from_cents(500)),
    ("tofu", Money::from_cents(300)),
    ("quinoa", Money::from_cents(200)),
    ("hot_sauce", Money::from_cents(50)),
    ("mayo", Money::from_cents(50)),
    ("ketchup", Money::from_cents(50)),
    ("mustard", Money::from_cents(50)),
];

/// Number of toppings in the catalog.
pub const TOPPING_COUNT: usize = TOPPING_PRICES.len();

/// Price for a topping identifier, `None` if it is not in the catalog.
pub fn topping_price(topping: &str) -> Option<Money> {
    TOPPING_PRICES
        .iter()
        .find(|(name, _)| *name == topping)
        .map(|(_, price)| *price)
}

/// Whether an identifier belongs to the catalog.
pub fn is_topping(topping: &str) -> bool {
    topping_price(topping).is_some()
}

/// All catalog identifiers, in table order.
pub fn topping_names() -> impl Iterator<Item = &'static str> {
    TOPPING_PRICES.iter().map(|(name, _)| *name)
}

// =============================================================================
// Unit Tests
// =============================================================================
