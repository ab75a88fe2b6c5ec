//! # Error Types
//!
//! Domain-specific error types for cono-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cono-core errors (this file)                                          │
//! │  ├── CoreError        - Pricing pipeline failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cono-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP API errors (in app)                                              │
//! │  └── ApiError         - What clients see (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (variant name, topping ids)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing engine errors.
///
/// These errors represent rule violations inside the pricing pipeline.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested cone variant is not in the catalog.
    ///
    /// ## When This Occurs
    /// - A caller passes a variant string outside {Carnivore, Vegetarian,
    ///   Healthy}
    /// - A stored order's variant column was written by an older catalog
    ///   or edited outside the API
    ///
    /// ## User Workflow
    /// ```text
    /// price_order("Vegan", "Small", ...)
    ///      │
    ///      ▼
    /// UnsupportedVariant("Vegan")  ← fatal, nothing logged
    ///      │
    ///      ▼
    /// API create/update: rejected with 422
    /// API reads of stored rows: degrade to price 0 + ERROR_PRICING event
    /// ```
    #[error("Unsupported cone variant: {0}")]
    UnsupportedVariant(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before the pricing pipeline runs; the core
/// itself stays permissive (unknown toppings are ignored, not rejected).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// One or more topping identifiers are outside the closed catalog.
    ///
    /// Carries the offending identifiers so the API can echo them back.
    #[error("the following toppings are not allowed: {}", .invalid.join(", "))]
    InvalidToppings { invalid: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnsupportedVariant("Vegan".to_string());
        assert_eq!(err.to_string(), "Unsupported cone variant: Vegan");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer".to_string(),
        };
        assert_eq!(err.to_string(), "customer is required");

        let err = ValidationError::TooLong {
            field: "customer".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "customer must be at most 100 characters");
    }

    #[test]
    fn test_invalid_toppings_message_lists_offenders() {
        let err = ValidationError::InvalidToppings {
            invalid: vec!["gold_leaf".to_string(), "caviar".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "the following toppings are not allowed: gold_leaf, caviar"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
