//! # Validation Module
//!
//! Strict checks over externally supplied data.
//!
//! The pricing path is deliberately tolerant: unknown selection ids price
//! as not-selected and never fail. These validators exist for callers
//! that want to surface data-quality problems instead of silently
//! absorbing them, e.g. at catalog load or when debugging a form.

use crate::error::{CoreError, CoreResult};
use crate::product::{ProductDefinition, SelectionSet};

/// Result type for validation operations.
pub type ValidationResult = CoreResult<()>;

// =============================================================================
// Definition Validators
// =============================================================================

/// Validates a product definition.
///
/// ## Rules
/// - Base price must be non-negative (option deltas may still drive a
///   configured price negative; that is the supplier's data to own)
pub fn validate_definition(definition: &ProductDefinition) -> ValidationResult {
    if definition.base_price_cents < 0 {
        return Err(CoreError::NegativeBasePrice {
            product_id: definition.id.clone(),
        });
    }

    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Collects every reference in `selection` that the definition does not
/// know: whole categories first, then options within known categories.
pub fn unknown_references(
    definition: &ProductDefinition,
    selection: &SelectionSet,
) -> Vec<CoreError> {
    let mut errors = Vec::new();

    for (category_id, option_ids) in selection {
        match definition.params.get(category_id) {
            None => errors.push(CoreError::UnknownCategory {
                product_id: definition.id.clone(),
                category_id: category_id.clone(),
            }),
            Some(category) => {
                for option_id in option_ids {
                    if !category.options.contains_key(option_id) {
                        errors.push(CoreError::UnknownOption {
                            category_id: category_id.clone(),
                            option_id: option_id.clone(),
                        });
                    }
                }
            }
        }
    }

    errors
}

/// Strict variant: fails on the first unknown reference.
pub fn check_selection(
    definition: &ProductDefinition,
    selection: &SelectionSet,
) -> ValidationResult {
    match unknown_references(definition, selection).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{ParamCategory, ParamOption};
    use std::collections::{BTreeMap, BTreeSet};

    fn definition() -> ProductDefinition {
        ProductDefinition {
            id: "margherita".to_string(),
            name: "Margherita".to_string(),
            base_price_cents: 3000,
            params: BTreeMap::from([(
                "toppings".to_string(),
                ParamCategory {
                    label: "Toppings".to_string(),
                    options: BTreeMap::from([(
                        "olives".to_string(),
                        ParamOption {
                            label: "Olives".to_string(),
                            price_delta_cents: 200,
                            is_default: false,
                        },
                    )]),
                },
            )]),
        }
    }

    fn selection(entries: &[(&str, &[&str])]) -> SelectionSet {
        entries
            .iter()
            .map(|(category, options)| {
                (
                    category.to_string(),
                    options.iter().map(|o| o.to_string()).collect::<BTreeSet<_>>(),
                )
            })
            .collect()
    }

    #[test]
    fn test_valid_selection_passes() {
        let sel = selection(&[("toppings", &["olives"])]);
        assert!(check_selection(&definition(), &sel).is_ok());
        assert!(unknown_references(&definition(), &sel).is_empty());
    }

    #[test]
    fn test_unknown_category_reported() {
        let sel = selection(&[("extras", &["gold-leaf"])]);
        let err = check_selection(&definition(), &sel).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory { .. }));
    }

    #[test]
    fn test_unknown_option_reported() {
        let sel = selection(&[("toppings", &["olives", "anchovies"])]);
        let errors = unknown_references(&definition(), &sel);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            CoreError::UnknownOption { option_id, .. } if option_id == "anchovies"
        ));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let mut def = definition();
        def.base_price_cents = -100;
        assert!(matches!(
            validate_definition(&def),
            Err(CoreError::NegativeBasePrice { .. })
        ));
        assert!(validate_definition(&definition()).is_ok());
    }
}
