//! # Widget Settings
//!
//! Runtime configuration loaded by the embedder at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TRATTORIA_*`)
//! 2. Embedder-supplied JSON (`Settings` is a serde contract)
//! 3. Defaults (this file)
//!
//! Settings are read-only after initialization, so no mutex is needed.

use serde::{Deserialize, Serialize};
use trattoria_core::{
    BoundedCounter, CoreResult, Money, QuantityBounds, DEFAULT_AMOUNT,
    DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT,
};

// =============================================================================
// Amount Widget Settings
// =============================================================================

/// Bounds and starting value shared by every amount picker the widget
/// mints: the per-product configurator and each cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmountWidgetSettings {
    /// Value a fresh picker starts at.
    pub default_value: i64,

    /// Lower bound (inclusive).
    pub min: i64,

    /// Upper bound (inclusive).
    pub max: i64,
}

impl Default for AmountWidgetSettings {
    fn default() -> Self {
        AmountWidgetSettings {
            default_value: DEFAULT_AMOUNT,
            min: DEFAULT_MIN_AMOUNT,
            max: DEFAULT_MAX_AMOUNT,
        }
    }
}

impl AmountWidgetSettings {
    /// The validated range; fails when configuration inverted min/max.
    pub fn bounds(&self) -> CoreResult<QuantityBounds> {
        QuantityBounds::new(self.min, self.max)
    }

    /// A fresh counter at the configured starting value.
    pub fn counter(&self) -> CoreResult<BoundedCounter> {
        Ok(self.bounds()?.counter(self.default_value))
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartSettings {
    /// Flat delivery fee in cents, charged whenever the cart holds
    /// nonzero total quantity.
    pub delivery_fee_cents: i64,
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
        }
    }
}

impl CartSettings {
    /// The delivery fee as Money.
    #[inline]
    pub fn delivery_fee(&self) -> Money {
        Money::from_cents(self.delivery_fee_cents)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// All widget configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub amount_widget: AmountWidgetSettings,
    pub cart: CartSettings,
}

impl Settings {
    /// Builds settings from defaults plus environment overrides.
    ///
    /// ## Environment Variables
    /// - `TRATTORIA_DELIVERY_FEE_CENTS`: override the flat delivery fee
    /// - `TRATTORIA_MAX_AMOUNT`: override the amount picker upper bound
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Ok(raw) = std::env::var("TRATTORIA_DELIVERY_FEE_CENTS") {
            if let Ok(fee) = raw.parse::<i64>() {
                settings.cart.delivery_fee_cents = fee;
            }
        }

        if let Ok(raw) = std::env::var("TRATTORIA_MAX_AMOUNT") {
            if let Ok(max) = raw.parse::<i64>() {
                settings.amount_widget.max = max;
            }
        }

        settings
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.amount_widget.default_value, 1);
        assert_eq!(settings.amount_widget.min, 0);
        assert_eq!(settings.amount_widget.max, 10);
        assert_eq!(settings.cart.delivery_fee_cents, 2000);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"cart": {"deliveryFeeCents": 1500}}"#).unwrap();
        assert_eq!(settings.cart.delivery_fee_cents, 1500);
        assert_eq!(settings.amount_widget.max, 10);
    }

    #[test]
    fn test_counter_from_settings() {
        let settings = AmountWidgetSettings::default();
        let counter = settings.counter().unwrap();
        assert_eq!(counter.value(), 1);
        assert_eq!(counter.min(), 0);
        assert_eq!(counter.max(), 10);
    }

    #[test]
    fn test_inverted_bounds_surface_invalid_range() {
        let settings = AmountWidgetSettings {
            default_value: 1,
            min: 5,
            max: 2,
        };
        assert!(settings.bounds().is_err());
    }
}
