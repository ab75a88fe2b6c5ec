//! # Validation Module
//!
//! Input validation for order intake.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum)                                                   │
//! │  ├── Type validation (JSON deserialization)                             │
//! │  └── Missing/mistyped fields rejected before handlers run               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — business rule validation                        │
//! │  ├── Customer name present and bounded                                  │
//! │  └── Variant / size / toppings inside the catalogs                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine leniency                                       │
//! │  ├── Unknown size → Medium, unknown topping → skipped                   │
//! │  └── Catches rows written before these checks existed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Intake is deliberately stricter than the engine: the engine degrades
//! oddities so stored history always prices, while these checks keep *new*
//! rows canonical.
//!
//! ## Usage
//! ```rust,no_run
//! use cono_core::validation::{validate_customer, validate_variant};
//!
//! // Validate before database insert
//! validate_customer("Alice Johnson").unwrap();
//! validate_variant("Carnivore").unwrap();
//! ```

use crate::error::ValidationError;
use crate::toppings;
use crate::types::Size;
use crate::variant::Variant;
use crate::MAX_CUSTOMER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name, ready for storage.
///
/// ## Example
/// ```rust
/// use cono_core::validation::validate_customer;
///
/// assert_eq!(validate_customer("  Alice  ").unwrap(), "Alice");
/// assert!(validate_customer("").is_err());
/// assert!(validate_customer(&"A".repeat(200)).is_err());
/// ```
pub fn validate_customer(customer: &str) -> ValidationResult<String> {
    let customer = customer.trim();

    if customer.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if customer.len() > MAX_CUSTOMER_LEN {
        return Err(ValidationError::TooLong {
            field: "customer".to_string(),
            max: MAX_CUSTOMER_LEN,
        });
    }

    Ok(customer.to_string())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a variant name against the variant catalog.
///
/// ## Rules
/// - Must be exactly one of Carnivore, Vegetarian, Healthy (case-sensitive)
///
/// ## Example
/// ```rust
/// use cono_core::validation::validate_variant;
///
/// assert!(validate_variant("Vegetarian").is_ok());
/// assert!(validate_variant("Vegan").is_err());
/// assert!(validate_variant("carnivore").is_err());
/// ```
pub fn validate_variant(variant: &str) -> ValidationResult<()> {
    if Variant::from_name(variant).is_some() {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "variant".to_string(),
        allowed: Variant::ALL.iter().map(|v| v.name().to_string()).collect(),
    })
}

/// Validates a size name at intake.
///
/// The engine itself treats an unknown size as Medium; rejecting it here
/// keeps stored orders canonical so that fallback only ever applies to
/// legacy rows.
///
/// ## Example
/// ```rust
/// use cono_core::validation::validate_size;
///
/// assert!(validate_size("Small").is_ok());
/// assert!(validate_size("Huge").is_err());
/// ```
pub fn validate_size(size: &str) -> ValidationResult<()> {
    if Size::from_name(size).is_some() {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "size".to_string(),
        allowed: Size::ALL.iter().map(|s| s.name().to_string()).collect(),
    })
}

/// Validates requested toppings against the topping catalog.
///
/// ## Rules
/// - Every entry must be a catalog topping id
/// - Duplicates are fine (each occurrence is charged)
/// - An empty list is fine (plain base cone)
///
/// The error carries *all* offenders, not just the first, so a client can
/// fix the whole request in one round trip.
pub fn validate_toppings(requested: &[String]) -> ValidationResult<()> {
    let invalid: Vec<String> = requested
        .iter()
        .filter(|name| !toppings::is_topping(name))
        .cloned()
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(ValidationError::InvalidToppings { invalid })
}

// =============================================================================
// Unit Tests
// =============================================================================
