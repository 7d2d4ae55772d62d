//! # Catalog
//!
//! The product definitions for one session, parsed from the catalog
//! source's JSON. The catalog is loaded once at session start and is
//! read-only afterwards; cart lines snapshot what they need, so nothing
//! here is consulted after add-to-cart.
//!
//! ## Wire Format
//! A JSON array of product definitions:
//! ```json
//! [
//!   {
//!     "id": "margherita",
//!     "name": "Margherita",
//!     "basePriceCents": 3000,
//!     "params": {
//!       "toppings": {
//!         "label": "Toppings",
//!         "options": {
//!           "olives": { "label": "Olives", "priceDeltaCents": 200, "default": false }
//!         }
//!       }
//!     }
//!   }
//! ]
//! ```

use tracing::warn;
use trattoria_core::{validation, ProductDefinition};

// =============================================================================
// Catalog
// =============================================================================

/// Ordered product definitions, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductDefinition>,
}

impl Catalog {
    /// Builds a catalog from already-parsed definitions.
    ///
    /// Definitions are kept in supplied order (the menu display order).
    /// A duplicated id replaces the earlier definition; data-quality
    /// problems are logged and the definition is kept, because the
    /// pricing engine surfaces bad catalog numbers as-is rather than
    /// refusing to sell.
    pub fn new(products: Vec<ProductDefinition>) -> Self {
        let mut catalog = Catalog {
            products: Vec::with_capacity(products.len()),
        };

        for product in products {
            if let Err(error) = validation::validate_definition(&product) {
                warn!(product_id = %product.id, %error, "catalog definition failed validation");
            }
            if let Some(existing) = catalog
                .products
                .iter_mut()
                .find(|existing| existing.id == product.id)
            {
                warn!(product_id = %product.id, "duplicate product id in catalog, last definition wins");
                *existing = product;
            } else {
                catalog.products.push(product);
            }
        }

        catalog
    }

    /// Parses the catalog source's JSON array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let products: Vec<ProductDefinition> = serde_json::from_str(json)?;
        Ok(Catalog::new(products))
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&ProductDefinition> {
        self.products.iter().find(|product| product.id == product_id)
    }

    /// All products in menu display order.
    #[inline]
    pub fn products(&self) -> &[ProductDefinition] {
        &self.products
    }

    /// Number of products.
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog holds no products.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {
            "id": "margherita",
            "name": "Margherita",
            "basePriceCents": 3000,
            "params": {
                "sauce": {
                    "label": "Sauce",
                    "options": {
                        "tomato": { "label": "Tomato", "priceDeltaCents": 200, "default": true },
                        "cream": { "label": "Sour cream", "priceDeltaCents": 200 }
                    }
                }
            }
        },
        { "id": "cola", "name": "Cola", "basePriceCents": 500 }
    ]"#;

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("margherita").unwrap().base_price_cents, 3000);
        assert!(catalog.get("calzone").is_none());

        let sauce = &catalog.get("margherita").unwrap().params["sauce"];
        assert!(sauce.options["tomato"].is_default);
        assert!(!sauce.options["cream"].is_default);
    }

    #[test]
    fn test_menu_order_is_preserved() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["margherita", "cola"]);
    }

    #[test]
    fn test_duplicate_id_last_definition_wins() {
        let json = r#"[
            { "id": "cola", "name": "Cola", "basePriceCents": 500 },
            { "id": "cola", "name": "Cherry Cola", "basePriceCents": 600 }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("cola").unwrap().name, "Cherry Cola");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Catalog::from_json("not a catalog").is_err());
    }
}
