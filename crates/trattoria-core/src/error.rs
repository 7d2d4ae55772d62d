//! # Error Types
//!
//! Domain-specific error types for trattoria-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, option id, etc.)
//! 3. Errors are enum variants, never String
//!
//! ## Recovery Policy
//! Almost every condition in this crate degrades to "ignore and keep the
//! prior valid state": unparseable counter input retains the old value,
//! unknown selection ids are priced as not-selected. The variants below
//! exist for the strict validators and for construction-time data errors,
//! which are the only conditions worth surfacing to the caller.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// None of these may abort an in-progress ordering session. Unknown
/// references are reported by [`crate::validation`] but tolerated by the
/// pricing path; only construction-time data errors are fatal to the
/// instance being built.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Counter bounds are inverted (`min > max`).
    ///
    /// ## When This Occurs
    /// - A counter is built directly with a bad range
    /// - Widget settings carry a bad min/max pair
    #[error("invalid counter range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// A selection references a category the product does not define.
    ///
    /// Selections come from user-editable form state, so the pricing path
    /// treats this as not-selected instead of failing. Only the strict
    /// validator returns it.
    #[error("product {product_id} has no category '{category_id}'")]
    UnknownCategory {
        product_id: String,
        category_id: String,
    },

    /// A selection references an option absent from its category.
    #[error("category '{category_id}' has no option '{option_id}'")]
    UnknownOption {
        category_id: String,
        option_id: String,
    },

    /// Product id not present in the catalog.
    #[error("product not found: {0}")]
    UnknownProduct(String),

    /// A product definition carries a negative base price.
    ///
    /// The pricing engine itself passes negative results through (bad
    /// option data is the catalog supplier's concern), but a definition
    /// that starts negative is rejected by the definition validator.
    #[error("product {product_id} has a negative base price")]
    NegativeBasePrice { product_id: String },
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
        let err = CoreError::InvalidRange { min: 5, max: 1 };
        assert_eq!(
            err.to_string(),
            "invalid counter range: min 5 is greater than max 1"
        );

        let err = CoreError::UnknownOption {
            category_id: "toppings".to_string(),
            option_id: "anchovies".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "category 'toppings' has no option 'anchovies'"
        );
    }

    #[test]
    fn test_unknown_product_message() {
        let err = CoreError::UnknownProduct("pizza".to_string());
        assert_eq!(err.to_string(), "product not found: pizza");
    }
}
